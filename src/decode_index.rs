use crate::quadruple::{LengthQuadruple, FIELDS, MAX_WIDTH};
use crate::slot::{Slot, HALF_LEN};

/// Gather indices that unpack one group into four zero-extended 8-byte lanes.
///
/// `low` is indexed by destination byte `0..32` and reads the first 16 packed bytes. `high` is
/// indexed by destination byte `16..32` and reads packed bytes `16..32`. The lanes for the first two
/// fields only ever come from `low`; the lanes for the last two are `low[16..] | high`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeTableEntry {
    pub low: [Slot; 2 * HALF_LEN],
    pub high: [Slot; HALF_LEN],
}

impl DecodeTableEntry {
    /// Compute the decode gather indices for `q`.
    pub const fn new(q: LengthQuadruple) -> Self {
        DecodeTableEntry {
            low: low_half_slots(q),
            high: high_half_slots(q),
        }
    }

    /// True when every packed byte lies in the low source half, so the high gather is a no-op and
    /// a single shuffle suffices.
    pub fn fits_low_half(&self) -> bool {
        self.high.iter().all(|s| !s.is_index())
    }

    /// Number of destination bytes sourced from the high packed half.
    pub fn high_len(&self) -> usize {
        self.high.iter().filter(|s| s.is_index()).count()
    }
}

// Walk all four fields with a running cursor over the packed stream. A byte is taken from the low
// source half iff its packed position is below 16.
const fn low_half_slots(q: LengthQuadruple) -> [Slot; 2 * HALF_LEN] {
    let mut slots = [Slot::Zero; 2 * HALF_LEN];
    let mut cursor = 0usize;
    let mut field = 0;
    while field < FIELDS {
        let width = q.width(field);
        let mut i = 0;
        while i < width {
            if cursor < HALF_LEN {
                slots[field * MAX_WIDTH + i] = Slot::Index(cursor as u8);
            }
            cursor += 1;
            i += 1;
        }
        field += 1;
    }
    slots
}

// The first two fields fill at most 16 bytes so only the last two fields can reach the high half.
const fn high_half_slots(q: LengthQuadruple) -> [Slot; HALF_LEN] {
    let mut slots = [Slot::Zero; HALF_LEN];
    let mut cursor = q.width(0) + q.width(1);
    let mut field = 2;
    while field < FIELDS {
        let width = q.width(field);
        let mut i = 0;
        while i < width {
            if cursor >= HALF_LEN {
                slots[(field - 2) * MAX_WIDTH + i] = Slot::Index((cursor - HALF_LEN) as u8);
            }
            cursor += 1;
            i += 1;
        }
        field += 1;
    }
    slots
}

/// Builds decode gather indices for a group.
#[derive(Copy, Clone, Debug, Default)]
pub struct DecodeIndexBuilder;

impl DecodeIndexBuilder {
    pub fn build(&self, q: LengthQuadruple) -> DecodeTableEntry {
        DecodeTableEntry::new(q)
    }
}
