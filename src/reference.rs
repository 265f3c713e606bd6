//! Portable evaluation of the gather tables.
//!
//! These functions apply a `DecodeTableEntry` or `EncodeTableEntry` exactly the way a vector kernel
//! would: one gather per source half, combined with OR or with overlapping stores. They are used to
//! check the tables and may serve as a fallback on targets without byte shuffles.

use crunchy::unroll;

use crate::decode_index::DecodeTableEntry;
use crate::encode_index::{EncodeHigh, EncodeTableEntry};
use crate::error::TableError;
use crate::quadruple::{LengthQuadruple, FIELDS, MAX_WIDTH};
use crate::slot::{Slot, HALF_LEN};

/// Size of the register a group is loaded into or stored from.
pub const GROUP_BYTES: usize = FIELDS * MAX_WIDTH;

#[inline(always)]
fn gather_half(src: &[u8; HALF_LEN], slots: &[Slot]) -> [u8; HALF_LEN] {
    debug_assert_eq!(HALF_LEN, slots.len());
    let mut out = [0u8; HALF_LEN];
    unroll! {
        for i in 0..16 {
            out[i] = slots[i].gather(src);
        }
    }
    out
}

#[inline(always)]
fn split(register: &[u8; GROUP_BYTES]) -> ([u8; HALF_LEN], [u8; HALF_LEN]) {
    let mut lo = [0u8; HALF_LEN];
    let mut hi = [0u8; HALF_LEN];
    lo.copy_from_slice(&register[..HALF_LEN]);
    hi.copy_from_slice(&register[HALF_LEN..]);
    (lo, hi)
}

fn check_len(needed: usize, actual: usize) -> Result<(), TableError> {
    if actual < needed {
        Err(TableError::ShortBuffer { needed, actual })
    } else {
        Ok(())
    }
}

/// Unpack the group at the start of `input` into four zero-extended lanes.
///
/// Reads `q.packed_length()` bytes; unlike a vector kernel it never reads past the end of `input`.
pub fn decode_group(
    q: LengthQuadruple,
    entry: &DecodeTableEntry,
    input: &[u8],
) -> Result<[u8; GROUP_BYTES], TableError> {
    check_len(q.packed_length(), input.len())?;
    let mut register = [0u8; GROUP_BYTES];
    let loaded = input.len().min(GROUP_BYTES);
    register[..loaded].copy_from_slice(&input[..loaded]);
    let (src_lo, src_hi) = split(&register);

    let mut out = [0u8; GROUP_BYTES];
    out[..HALF_LEN].copy_from_slice(&gather_half(&src_lo, &entry.low[..HALF_LEN]));
    let cross = gather_half(&src_lo, &entry.low[HALF_LEN..]);
    let upper = gather_half(&src_hi, &entry.high);
    for i in 0..HALF_LEN {
        out[HALF_LEN + i] = cross[i] | upper[i];
    }
    Ok(out)
}

/// Like `decode_group()` but returns the lanes as integers.
pub fn decode_values(
    q: LengthQuadruple,
    entry: &DecodeTableEntry,
    input: &[u8],
) -> Result<[u64; FIELDS], TableError> {
    Ok(lanes_to_values(&decode_group(q, entry, input)?))
}

/// Pack four 8-byte lanes into `output` using `entry`.
///
/// Returns the number of bytes written, which is always `q.packed_length()`.
pub fn encode_group(
    q: LengthQuadruple,
    entry: &EncodeTableEntry,
    lanes: &[u8; GROUP_BYTES],
    output: &mut [u8],
) -> Result<usize, TableError> {
    let len = q.packed_length();
    check_len(len, output.len())?;
    let (src_lo, src_hi) = split(lanes);
    let low = gather_half(&src_lo, &entry.low);

    let mut packed = [0u8; GROUP_BYTES];
    match &entry.high {
        EncodeHigh::SplitStore(high) => {
            let offset = entry.high_offset(q);
            packed[..HALF_LEN].copy_from_slice(&low);
            packed[offset..offset + HALF_LEN].copy_from_slice(&gather_half(&src_hi, high));
        }
        EncodeHigh::Combined(high) => {
            let cross = gather_half(&src_hi, &high[..HALF_LEN]);
            let upper = gather_half(&src_hi, &high[HALF_LEN..]);
            for i in 0..HALF_LEN {
                packed[i] = low[i] | cross[i];
                packed[HALF_LEN + i] = upper[i];
            }
        }
    }
    output[..len].copy_from_slice(&packed[..len]);
    Ok(len)
}

/// Like `encode_group()` but takes the lanes as integers.
///
/// Bytes of a value beyond the width recorded in `q` are dropped.
pub fn encode_values(
    q: LengthQuadruple,
    entry: &EncodeTableEntry,
    values: &[u64; FIELDS],
    output: &mut [u8],
) -> Result<usize, TableError> {
    encode_group(q, entry, &values_to_lanes(values), output)
}

pub fn values_to_lanes(values: &[u64; FIELDS]) -> [u8; GROUP_BYTES] {
    let mut lanes = [0u8; GROUP_BYTES];
    for (lane, v) in lanes.chunks_exact_mut(MAX_WIDTH).zip(values.iter()) {
        lane.copy_from_slice(&v.to_le_bytes());
    }
    lanes
}

pub fn lanes_to_values(lanes: &[u8; GROUP_BYTES]) -> [u64; FIELDS] {
    let mut values = [0u64; FIELDS];
    for (v, lane) in values.iter_mut().zip(lanes.chunks_exact(MAX_WIDTH)) {
        let mut bytes = [0u8; MAX_WIDTH];
        bytes.copy_from_slice(lane);
        *v = u64::from_le_bytes(bytes);
    }
    values
}
