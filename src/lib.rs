/*! # Shuffle Tables for 64-bit Stream VByte Groups
This crate computes the byte-gather tables that let a vector codec pack and unpack groups of four
64-bit integers, each stored in 1 to 8 bytes, with byte shuffles instead of scalar loops.

A group is described by a `LengthQuadruple` of field widths. There are 4096 of them and each has a
fixed position, `LengthQuadruple::index()`, which is the 12-bit group key stored in the key stream.
For each quadruple the crate produces:
* the packed length of the group,
* a `DecodeTableEntry` that expands the packed bytes into four zero-extended 8-byte lanes,
* an `EncodeTableEntry` that collapses the lanes back into packed bytes.

256-bit shuffles cannot move a byte between the two 16-byte halves of a register, so every table is
split into one gather per source half. Bytes that must come from the other half are `Slot::Zero`
in one gather and supplied by the other.

## Example

```
use stream_vbyte_64_tables::{
    decode_table, encode_table, index_of, packed_length, reference, LengthQuadruple,
};

let q = LengthQuadruple::new([4, 8, 8, 2]).unwrap();
assert_eq!(22, packed_length(q));
assert_eq!(0b001_111_111_011, index_of(q));

let values = [0xdeadbeef, u64::MAX, 1 << 60, 0x1234];
let mut packed = [0u8; 32];
let len = reference::encode_values(q, &encode_table(q), &values, &mut packed).unwrap();
assert_eq!(22, len);

let decoded = reference::decode_values(q, &decode_table(q), &packed[..len]).unwrap();
assert_eq!(values, decoded);
```

## Generating every table

```
use stream_vbyte_64_tables::{EncodeLayout, TableAssembler, TableConfig, TableRecord};

let config = TableConfig::default().with_encode_layout(EncodeLayout::Combined);
let mut records: Vec<TableRecord> = Vec::new();
let tables = TableAssembler::new(config).assemble_into(&mut records).unwrap();
assert_eq!(4096, tables.len());
assert_eq!(records[4095].packed_length, 32);
```
*/

mod arch;
mod assembler;
mod config;
mod decode_index;
mod encode_index;
mod error;
mod length_sum;
mod quadruple;
pub mod reference;
pub mod render;
mod slot;

pub use assembler::{tables, GeneratedTables, TableAssembler, TableRecord, TableSink};
pub use config::TableConfig;
pub use decode_index::{DecodeIndexBuilder, DecodeTableEntry};
pub use encode_index::{EncodeHigh, EncodeIndexBuilder, EncodeLayout, EncodeTableEntry};
pub use error::TableError;
pub use length_sum::LENGTH_TABLE;
pub use quadruple::{LengthQuadruple, LengthSpace, FIELDS, MAX_WIDTH, QUADRUPLE_COUNT};
pub use slot::{Slot, HALF_LEN, SENTINEL};

/// Position of `q` in every table.
#[inline]
pub fn index_of(q: LengthQuadruple) -> usize {
    q.index()
}

/// Number of bytes the group `q` occupies when packed.
#[inline]
pub fn packed_length(q: LengthQuadruple) -> usize {
    length_sum::packed_length(q)
}

/// Decode gather indices for `q`.
#[inline]
pub fn decode_table(q: LengthQuadruple) -> DecodeTableEntry {
    *tables().decode(q)
}

/// Encode gather indices for `q` in the default `EncodeLayout`.
#[inline]
pub fn encode_table(q: LengthQuadruple) -> EncodeTableEntry {
    *tables().encode(q)
}

#[cfg(test)]
pub(crate) mod tests;
