/// Number of bytes in one lane half of a 256-bit register. Shuffles cannot move bytes across it.
pub const HALF_LEN: usize = 16;

/// Byte value used for `Slot::Zero` when a table is lowered to shuffle masks.
///
/// The high bit is set so x86 `pshufb` writes zero, and the value is `>= 16` so aarch64 `tbl` does too.
pub const SENTINEL: u8 = 0xff;

/// One output byte of a gather confined to a single 16-byte half.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    /// Produce a zero byte: either zero-extension or a byte supplied by the complementary half.
    #[default]
    Zero,
    /// Copy this byte (always `< 16`) of the source half.
    Index(u8),
}

impl Slot {
    #[inline]
    pub const fn is_index(&self) -> bool {
        matches!(self, Slot::Index(_))
    }

    #[inline]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Slot::Index(i) => Some(*i as usize),
            Slot::Zero => None,
        }
    }

    /// Lower to a shuffle mask byte.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        match self {
            Slot::Index(i) => i,
            Slot::Zero => SENTINEL,
        }
    }

    /// Inverse of `to_byte()`; any byte `>= 16` is treated as a sentinel.
    #[inline]
    pub const fn from_byte(b: u8) -> Self {
        if (b as usize) < HALF_LEN {
            Slot::Index(b)
        } else {
            Slot::Zero
        }
    }

    /// Apply this slot to a source half.
    #[inline(always)]
    pub fn gather(self, src: &[u8; HALF_LEN]) -> u8 {
        match self {
            Slot::Index(i) => src[i as usize],
            Slot::Zero => 0,
        }
    }
}
