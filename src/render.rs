//! Lowering of gather tables to AVX2 shuffle masks.
//!
//! `vpshufb` only addresses bytes within its own 128-bit lane, so every gather that moves bytes
//! from the low source half to the high destination half is expressed as a shuffle of the low lane
//! followed by a `vpermq` that moves the result up.

use crate::arch::shuffle::{or, permute4x64, shuffle_epi8};
use crate::decode_index::DecodeTableEntry;
use crate::encode_index::{EncodeHigh, EncodeTableEntry};
use crate::quadruple::LengthQuadruple;
use crate::slot::{Slot, HALF_LEN, SENTINEL};

/// `vpermq` immediate that moves the low lane of the second decode shuffle into the high lane and
/// fills the low lane from word 3, which the mask leaves zeroed.
pub const DECODE_PERMUTE: u8 = 0b0100_1111;

/// `vpermq` immediate that swaps the two lanes of the unpacked group before the second encode
/// shuffle.
pub const ENCODE_SWAP_PERMUTE: u8 = 0b0100_1110;

fn concat(lo: &[Slot], hi: &[Slot]) -> [u8; 32] {
    let mut mask = [SENTINEL; 32];
    for (m, s) in mask.iter_mut().zip(lo.iter().chain(hi.iter())) {
        *m = s.to_byte();
    }
    mask
}

/// Decode masks: `shuffle_epi8(data, shuffle_1) | permute4x64(shuffle_epi8(data, shuffle_2), DECODE_PERMUTE)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Avx2DecodeMasks {
    pub shuffle_1: [u8; 32],
    pub shuffle_2: [u8; 32],
}

impl Avx2DecodeMasks {
    pub fn new(entry: &DecodeTableEntry) -> Self {
        Avx2DecodeMasks {
            shuffle_1: concat(&entry.low[..HALF_LEN], &entry.high),
            shuffle_2: concat(&entry.low[HALF_LEN..], &[Slot::Zero; HALF_LEN]),
        }
    }

    /// Evaluate the kernel these masks drive on a 32-byte load of packed input.
    pub fn emulate(&self, data: &[u8; 32]) -> [u8; 32] {
        let direct = shuffle_epi8(data, &self.shuffle_1);
        let cross = permute4x64(&shuffle_epi8(data, &self.shuffle_2), DECODE_PERMUTE);
        or(&direct, &cross)
    }
}

impl From<&DecodeTableEntry> for Avx2DecodeMasks {
    fn from(entry: &DecodeTableEntry) -> Self {
        Avx2DecodeMasks::new(entry)
    }
}

/// Encode masks for either `EncodeLayout`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Avx2EncodeMasks {
    /// One lane-local shuffle. The low lane of the result is stored at offset 0 and the high lane
    /// at `offset`.
    SplitStore { shuffle: [u8; 32], offset: usize },
    /// `shuffle_epi8(data, shuffle_1) | shuffle_epi8(permute4x64(data, ENCODE_SWAP_PERMUTE), shuffle_2)`,
    /// stored once.
    Combined {
        shuffle_1: [u8; 32],
        shuffle_2: [u8; 32],
    },
}

impl Avx2EncodeMasks {
    pub fn new(q: LengthQuadruple, entry: &EncodeTableEntry) -> Self {
        match &entry.high {
            EncodeHigh::SplitStore(high) => Avx2EncodeMasks::SplitStore {
                shuffle: concat(&entry.low, high),
                offset: entry.high_offset(q),
            },
            EncodeHigh::Combined(high) => Avx2EncodeMasks::Combined {
                shuffle_1: concat(&entry.low, &high[HALF_LEN..]),
                shuffle_2: concat(&high[..HALF_LEN], &[Slot::Zero; HALF_LEN]),
            },
        }
    }

    /// Evaluate the kernel these masks drive on an unpacked group, returning the 32 bytes it would
    /// leave in memory. Only the first `packed_length` bytes are meaningful.
    pub fn emulate(&self, data: &[u8; 32]) -> [u8; 32] {
        match self {
            Avx2EncodeMasks::SplitStore { shuffle, offset } => {
                let shuffled = shuffle_epi8(data, shuffle);
                let mut out = [0u8; 32];
                out[..HALF_LEN].copy_from_slice(&shuffled[..HALF_LEN]);
                out[*offset..*offset + HALF_LEN].copy_from_slice(&shuffled[HALF_LEN..]);
                out
            }
            Avx2EncodeMasks::Combined {
                shuffle_1,
                shuffle_2,
            } => {
                let direct = shuffle_epi8(data, shuffle_1);
                let swapped = permute4x64(data, ENCODE_SWAP_PERMUTE);
                or(&direct, &shuffle_epi8(&swapped, shuffle_2))
            }
        }
    }
}
