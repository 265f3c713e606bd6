use crate::quadruple::{LengthQuadruple, MAX_WIDTH};
use crate::slot::{Slot, HALF_LEN};

/// How the gather for the last two fields is laid out.
///
/// The first two fields are always packed from the low unpacked half into packed positions
/// `0..a+b`. The last two fields live in the high unpacked half but their packed positions may start
/// anywhere in `[2, 16]`, so they may land on either side of the 16 byte boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum EncodeLayout {
    /// 16 slots, `high[j]` is packed position `a + b + j`.
    ///
    /// The kernel shuffles each unpacked half within its own lane and writes two overlapping 16 byte
    /// stores, the second at offset `a + b`.
    #[default]
    SplitStore,
    /// 32 slots, `high[p]` is absolute packed position `p`.
    ///
    /// The packed group is `gather(lo, low) | gather(hi, high)` over all 32 positions, and the
    /// kernel supplies `high[..16]` from a lane-swapped copy of the input.
    Combined,
}

impl EncodeLayout {
    /// Number of slots in the high gather.
    pub const fn high_len(&self) -> usize {
        match self {
            EncodeLayout::SplitStore => HALF_LEN,
            EncodeLayout::Combined => 2 * HALF_LEN,
        }
    }
}

/// Gather indices for the last two fields under a given `EncodeLayout`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncodeHigh {
    SplitStore([Slot; HALF_LEN]),
    Combined([Slot; 2 * HALF_LEN]),
}

impl EncodeHigh {
    pub fn layout(&self) -> EncodeLayout {
        match self {
            EncodeHigh::SplitStore(_) => EncodeLayout::SplitStore,
            EncodeHigh::Combined(_) => EncodeLayout::Combined,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        match self {
            EncodeHigh::SplitStore(s) => &s[..],
            EncodeHigh::Combined(s) => &s[..],
        }
    }
}

/// Gather indices that pack four 8-byte lanes back into a contiguous group.
///
/// `low` is indexed by packed position `0..16` and reads the low unpacked half (lanes 0 and 1).
/// `high` reads the high unpacked half (lanes 2 and 3), laid out as described by `EncodeLayout`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EncodeTableEntry {
    pub low: [Slot; HALF_LEN],
    pub high: EncodeHigh,
}

impl EncodeTableEntry {
    /// Compute the encode gather indices for `q` laid out per `layout`.
    pub const fn new(q: LengthQuadruple, layout: EncodeLayout) -> Self {
        let high = match layout {
            EncodeLayout::SplitStore => EncodeHigh::SplitStore(high_lane_slots::<HALF_LEN>(q, 0)),
            EncodeLayout::Combined => EncodeHigh::Combined(high_lane_slots::<{ 2 * HALF_LEN }>(
                q,
                q.width(0) + q.width(1),
            )),
        };
        EncodeTableEntry {
            low: low_lane_slots(q),
            high,
        }
    }

    pub fn layout(&self) -> EncodeLayout {
        self.high.layout()
    }

    /// Packed position that `high.slots()[0]` writes to.
    pub fn high_offset(&self, q: LengthQuadruple) -> usize {
        match self.high {
            EncodeHigh::SplitStore(_) => q.width(0) + q.width(1),
            EncodeHigh::Combined(_) => 0,
        }
    }
}

// Lanes 0 and 1 of the unpacked group occupy packed positions 0..a+b, which always fit in 16 bytes.
const fn low_lane_slots(q: LengthQuadruple) -> [Slot; HALF_LEN] {
    let mut slots = [Slot::Zero; HALF_LEN];
    let mut cursor = 0usize;
    let mut field = 0;
    while field < 2 {
        let mut i = 0;
        while i < q.width(field) {
            slots[cursor] = Slot::Index((field * MAX_WIDTH + i) as u8);
            cursor += 1;
            i += 1;
        }
        field += 1;
    }
    slots
}

// Lanes 2 and 3 read from the high unpacked half, so source indices restart at 0. `start` is the
// slot that receives the first byte of the third field.
const fn high_lane_slots<const N: usize>(q: LengthQuadruple, start: usize) -> [Slot; N] {
    let mut slots = [Slot::Zero; N];
    let mut cursor = start;
    let mut field = 2;
    while field < 4 {
        let mut i = 0;
        while i < q.width(field) {
            slots[cursor] = Slot::Index(((field - 2) * MAX_WIDTH + i) as u8);
            cursor += 1;
            i += 1;
        }
        field += 1;
    }
    slots
}

/// Builds encode gather indices for a group using a fixed `EncodeLayout`.
#[derive(Copy, Clone, Debug, Default)]
pub struct EncodeIndexBuilder {
    layout: EncodeLayout,
}

impl EncodeIndexBuilder {
    pub fn new(layout: EncodeLayout) -> Self {
        EncodeIndexBuilder { layout }
    }

    pub fn layout(&self) -> EncodeLayout {
        self.layout
    }

    pub fn build(&self, q: LengthQuadruple) -> EncodeTableEntry {
        EncodeTableEntry::new(q, self.layout)
    }
}
