use crate::quadruple::{LengthQuadruple, QUADRUPLE_COUNT};

const fn index_to_packed_len(index: usize) -> usize {
    (index & 0x7) + ((index >> 3) & 0x7) + ((index >> 6) & 0x7) + ((index >> 9) & 0x7) + 4
}

/// Generate a table that maps each group index to the number of packed bytes.
pub(crate) const fn packed_length_table() -> [u8; QUADRUPLE_COUNT] {
    let mut table = [0u8; QUADRUPLE_COUNT];
    let mut index = 0usize;
    while index < QUADRUPLE_COUNT {
        table[index] = index_to_packed_len(index) as u8;
        index += 1;
    }
    table
}

/// Packed length of every group, indexed by `LengthQuadruple::index()`.
pub static LENGTH_TABLE: [u8; QUADRUPLE_COUNT] = packed_length_table();

/// Returns the packed length of `q` by table lookup.
#[inline(always)]
pub fn packed_length(q: LengthQuadruple) -> usize {
    LENGTH_TABLE[q.index()] as usize
}
