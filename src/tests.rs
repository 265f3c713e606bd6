use crate::assembler::TableAssembler;
use crate::config::TableConfig;
use crate::decode_index::DecodeTableEntry;
use crate::encode_index::{EncodeLayout, EncodeTableEntry};
use crate::quadruple::{LengthQuadruple, LengthSpace, FIELDS, MAX_WIDTH};
use crate::reference::{self, GROUP_BYTES};
use crate::slot::HALF_LEN;
use rand::prelude::*;

/// Returns a mask covering the low `width` bytes of a lane.
pub(crate) fn lane_mask(width: usize) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << (width * 8)) - 1
    }
}

#[test]
fn lane_masks() {
    assert_eq!(0xff, lane_mask(1));
    assert_eq!(0xff_ffff, lane_mask(3));
    assert_eq!(u64::MAX, lane_mask(8));
}

/// Represents a single test group for encoding or decoding.
pub(crate) struct TestGroup {
    /// Widths of the group members.
    pub quadruple: LengthQuadruple,
    /// Contents of the group, each value exactly as wide as its field.
    pub values: [u64; FIELDS],
    /// Expected packed encoding.
    pub packed: Vec<u8>,
}

/// Yields a group for every quadruple in table order.
///
/// Every byte of a value is `pattern[field]` so a misplaced byte is attributable to its field.
pub(crate) struct GroupIter {
    space: LengthSpace,
    masks: [u64; FIELDS],
}

impl GroupIter {
    pub fn new(patterns: [u8; FIELDS]) -> Self {
        assert!(patterns.iter().all(|p| *p != 0));
        let mut masks = [0u64; FIELDS];
        for (pat, mask) in patterns.into_iter().zip(masks.iter_mut()) {
            *mask = u64::from_ne_bytes([pat; MAX_WIDTH]);
        }
        GroupIter {
            space: LengthSpace::new(),
            masks,
        }
    }
}

impl Iterator for GroupIter {
    type Item = TestGroup;

    fn next(&mut self) -> Option<Self::Item> {
        let quadruple = self.space.next()?;
        let mut values = [0u64; FIELDS];
        let mut packed = Vec::with_capacity(quadruple.packed_length());
        for field in 0..FIELDS {
            let width = quadruple.width(field);
            values[field] = lane_mask(width) & self.masks[field];
            packed.extend_from_slice(&values[field].to_le_bytes()[..width]);
        }
        Some(TestGroup {
            quadruple,
            values,
            packed,
        })
    }
}

fn assembled(layout: EncodeLayout) -> crate::GeneratedTables {
    TableAssembler::new(TableConfig::default().with_encode_layout(layout)).assemble()
}

// Values pack to the expected bytes and unpack to the same values.
pub(crate) fn test_encode_decode(layout: EncodeLayout) {
    let tables = assembled(layout);
    for test in GroupIter::new([0x1a, 0x1b, 0x1c, 0x1d]) {
        let q = test.quadruple;
        assert_eq!(q, LengthQuadruple::for_values(&test.values));
        let mut enc = [0xffu8; 64];
        let elen = reference::encode_values(q, tables.encode(q), &test.values, &mut enc).unwrap();
        assert_eq!(test.packed.len(), elen);
        assert_eq!(test.packed[..], enc[..elen], "{:?}", q);
        // bytes past the group are untouched.
        assert!(enc[elen..].iter().all(|b| *b == 0xff));

        let decoded = reference::decode_values(q, tables.decode(q), &enc[..elen]).unwrap();
        assert_eq!(test.values, decoded, "{:?}", q);
    }
}

// Any packed buffer survives decode then encode, even with garbage after the group.
pub(crate) fn test_packed_round_trip(layout: EncodeLayout) {
    let tables = assembled(layout);
    let mut rng = StdRng::from_seed([0xabu8; 32]);
    for q in LengthQuadruple::all() {
        for _ in 0..4 {
            let mut input = [0u8; GROUP_BYTES + 8];
            rng.fill(&mut input[..]);
            let lanes = reference::decode_group(q, tables.decode(q), &input).unwrap();
            let mut output = [0u8; GROUP_BYTES];
            let len = reference::encode_group(q, tables.encode(q), &lanes, &mut output).unwrap();
            assert_eq!(q.packed_length(), len);
            assert_eq!(input[..len], output[..len], "{:?}", q);
        }
    }
}

// Lanes are zero above their field width no matter what follows the group.
pub(crate) fn test_zero_extension(layout: EncodeLayout) {
    let tables = assembled(layout);
    let input = [0xffu8; GROUP_BYTES];
    for q in LengthQuadruple::all() {
        let values = reference::decode_values(q, tables.decode(q), &input).unwrap();
        for (field, v) in values.iter().enumerate() {
            assert_eq!(lane_mask(q.width(field)), *v, "{:?} field {}", q, field);
        }
    }
}

// No gather reads outside of its own 16 byte half.
pub(crate) fn test_lane_locality(layout: EncodeLayout) {
    let tables = assembled(layout);
    for q in LengthQuadruple::all() {
        let d: &DecodeTableEntry = tables.decode(q);
        let e: &EncodeTableEntry = tables.encode(q);
        assert_eq!(layout, e.layout());
        let slots = d
            .low
            .iter()
            .chain(d.high.iter())
            .chain(e.low.iter())
            .chain(e.high.slots().iter());
        for s in slots {
            assert!(s.index().map_or(true, |i| i < HALF_LEN), "{:?}", q);
        }
    }
}

/// Define `layout_suite` module with conformance tests for an `EncodeLayout`.
macro_rules! layout_test_suite {
    ($layout:expr) => {
        #[cfg(test)]
        mod layout_suite {
            use crate::encode_index::EncodeLayout;

            #[test]
            fn encode_decode() {
                crate::tests::test_encode_decode($layout);
            }

            #[test]
            fn packed_round_trip() {
                crate::tests::test_packed_round_trip($layout);
            }

            #[test]
            fn zero_extension() {
                crate::tests::test_zero_extension($layout);
            }

            #[test]
            fn lane_locality() {
                crate::tests::test_lane_locality($layout);
            }
        }
    };
}

pub(crate) use layout_test_suite;

mod split_store {
    crate::tests::layout_test_suite!(EncodeLayout::SplitStore);
}

mod combined {
    crate::tests::layout_test_suite!(EncodeLayout::Combined);
}
