use crate::error::TableError;
use std::fmt;
use std::iter::FusedIterator;

/// Number of fields in a group.
pub const FIELDS: usize = 4;
/// Largest width of a single field in bytes; also the width of an unpacked lane.
pub const MAX_WIDTH: usize = 8;
/// Number of distinct quadruples and therefore the length of every generated table.
pub const QUADRUPLE_COUNT: usize = MAX_WIDTH * MAX_WIDTH * MAX_WIDTH * MAX_WIDTH;

/// The byte widths of the four fields of a group, in the order they appear in the packed buffer.
///
/// Every width is in `[1, 8]`. The only way to obtain a `LengthQuadruple` is through a checked
/// constructor so the table builders never see an out of range width.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LengthQuadruple([u8; FIELDS]);

impl LengthQuadruple {
    /// Create a quadruple from four field widths.
    ///
    /// Returns `TableError::InvalidWidth` naming the first field outside of `[1, 8]`.
    pub fn new(widths: [u8; FIELDS]) -> Result<Self, TableError> {
        for (field, &width) in widths.iter().enumerate() {
            if width == 0 || width as usize > MAX_WIDTH {
                return Err(TableError::InvalidWidth { field, width });
            }
        }
        Ok(LengthQuadruple(widths))
    }

    /// Decode a table index back into the quadruple it describes.
    pub fn from_index(index: usize) -> Result<Self, TableError> {
        if index >= QUADRUPLE_COUNT {
            return Err(TableError::IndexOutOfRange(index));
        }
        Ok(Self::from_index_unchecked(index))
    }

    // Each field takes 3 bits of the index, the first field in the low bits.
    pub(crate) const fn from_index_unchecked(index: usize) -> Self {
        LengthQuadruple([
            (index & 0x7) as u8 + 1,
            ((index >> 3) & 0x7) as u8 + 1,
            ((index >> 6) & 0x7) as u8 + 1,
            ((index >> 9) & 0x7) as u8 + 1,
        ])
    }

    /// Returns the quadruple of minimal widths able to hold each of `values`.
    ///
    /// Zero still occupies one byte.
    pub fn for_values(values: &[u64; FIELDS]) -> Self {
        let mut widths = [0u8; FIELDS];
        for (w, v) in widths.iter_mut().zip(values.iter()) {
            *w = value_width(*v);
        }
        LengthQuadruple(widths)
    }

    /// Position of this quadruple in every generated table.
    ///
    /// This is the 12-bit group key: `(w0 - 1) | (w1 - 1) << 3 | (w2 - 1) << 6 | (w3 - 1) << 9`.
    #[inline]
    pub const fn index(&self) -> usize {
        (self.0[0] as usize - 1)
            | (self.0[1] as usize - 1) << 3
            | (self.0[2] as usize - 1) << 6
            | (self.0[3] as usize - 1) << 9
    }

    #[inline]
    pub const fn widths(&self) -> [u8; FIELDS] {
        self.0
    }

    /// Width of a single field.
    ///
    /// # Panics
    ///
    /// - If `field >= 4`.
    #[inline]
    pub const fn width(&self, field: usize) -> usize {
        self.0[field] as usize
    }

    /// Total number of bytes the group occupies when packed.
    #[inline]
    pub const fn packed_length(&self) -> usize {
        self.0[0] as usize + self.0[1] as usize + self.0[2] as usize + self.0[3] as usize
    }

    /// Iterate over all quadruples in table order.
    pub fn all() -> LengthSpace {
        LengthSpace::new()
    }
}

impl fmt::Debug for LengthQuadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LengthQuadruple({}, {}, {}, {})",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl TryFrom<[u8; FIELDS]> for LengthQuadruple {
    type Error = TableError;

    fn try_from(widths: [u8; FIELDS]) -> Result<Self, Self::Error> {
        LengthQuadruple::new(widths)
    }
}

#[inline]
fn value_width(value: u64) -> u8 {
    (8 - (value.leading_zeros() / 8).min(7)) as u8
}

/// Yields every `LengthQuadruple` in table order: ascending index, so the first field varies
/// fastest and the fourth field slowest.
#[derive(Clone, Debug)]
pub struct LengthSpace {
    next: usize,
    end: usize,
}

impl LengthSpace {
    pub fn new() -> Self {
        LengthSpace {
            next: 0,
            end: QUADRUPLE_COUNT,
        }
    }
}

impl Default for LengthSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for LengthSpace {
    type Item = LengthQuadruple;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        let q = LengthQuadruple::from_index_unchecked(self.next);
        self.next += 1;
        Some(q)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for LengthSpace {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        self.end -= 1;
        Some(LengthQuadruple::from_index_unchecked(self.end))
    }
}

impl ExactSizeIterator for LengthSpace {}
impl FusedIterator for LengthSpace {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_out_of_range_widths() {
        assert_eq!(
            LengthQuadruple::new([1, 0, 1, 1]),
            Err(TableError::InvalidWidth { field: 1, width: 0 })
        );
        assert_eq!(
            LengthQuadruple::new([1, 2, 3, 9]),
            Err(TableError::InvalidWidth { field: 3, width: 9 })
        );
        assert!(LengthQuadruple::try_from([8, 8, 8, 8]).is_ok());
        assert_eq!(
            LengthQuadruple::from_index(QUADRUPLE_COUNT),
            Err(TableError::IndexOutOfRange(QUADRUPLE_COUNT))
        );
    }

    #[test]
    fn index_is_a_bijection() {
        let mut seen = HashSet::new();
        for (i, q) in LengthQuadruple::all().enumerate() {
            assert_eq!(i, q.index());
            assert_eq!(q, LengthQuadruple::from_index(i).unwrap());
            assert!(seen.insert(q.widths()));
        }
        assert_eq!(QUADRUPLE_COUNT, seen.len());
    }

    #[test]
    fn first_field_varies_fastest() {
        let first = LengthQuadruple::all().take(9).collect::<Vec<_>>();
        assert_eq!([1, 1, 1, 1], first[0].widths());
        assert_eq!([2, 1, 1, 1], first[1].widths());
        assert_eq!([8, 1, 1, 1], first[7].widths());
        assert_eq!([1, 2, 1, 1], first[8].widths());
        assert_eq!(
            Some([8, 8, 8, 8]),
            LengthQuadruple::all().last().map(|q| q.widths())
        );
        assert_eq!(
            0b001_000_111_010,
            LengthQuadruple::new([3, 8, 1, 2]).unwrap().index()
        );
    }

    #[test]
    fn reverse_iteration_matches_forward() {
        let forward = LengthSpace::new().collect::<Vec<_>>();
        let mut backward = LengthSpace::new().rev().collect::<Vec<_>>();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(QUADRUPLE_COUNT, LengthSpace::new().len());
        assert_eq!(
            Some([2, 2, 1, 1]),
            LengthSpace::new().nth(9).map(|q| q.widths())
        );
        assert_eq!(None, LengthSpace::new().nth(QUADRUPLE_COUNT));
    }

    #[test]
    fn widths_for_values() {
        let q = LengthQuadruple::for_values(&[0, 0xff, 0x100, u64::MAX]);
        assert_eq!([1, 1, 2, 8], q.widths());
        let q = LengthQuadruple::for_values(&[1 << 24, (1 << 32) - 1, 1 << 48, 1 << 56]);
        assert_eq!([4, 4, 7, 8], q.widths());
        assert_eq!(23, q.packed_length());
    }
}
