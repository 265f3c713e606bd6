//! Portable models of the 256-bit byte shuffle instructions that consume the rendered masks.
//!
//! These follow the x86 semantics so rendered masks can be checked without the hardware:
//! `vpshufb` shuffles each 128-bit lane independently and `vpermq` moves whole 64-bit words.
use crunchy::unroll;

/// Model of `_mm256_shuffle_epi8`: within each 16-byte lane, a mask byte with the high bit set
/// produces zero, otherwise the low 4 bits select a byte of the same lane.
#[inline]
pub(crate) fn shuffle_epi8(data: &[u8; 32], mask: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    unroll! {
        for i in 0..32 {
            let m = mask[i];
            if m & 0x80 == 0 {
                out[i] = data[(i & 0x10) | (m & 0x0f) as usize];
            }
        }
    }
    out
}

/// Model of `_mm256_permute4x64_epi64`: each 2-bit field of `imm` selects a source word.
#[inline]
pub(crate) fn permute4x64(data: &[u8; 32], imm: u8) -> [u8; 32] {
    let mut out = [0u8; 32];
    for word in 0..4 {
        let src = ((imm >> (word * 2)) & 0x3) as usize;
        out[word * 8..word * 8 + 8].copy_from_slice(&data[src * 8..src * 8 + 8]);
    }
    out
}

/// Model of `_mm256_or_si256`.
#[inline]
pub(crate) fn or(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    unroll! {
        for i in 0..32 {
            out[i] = a[i] | b[i];
        }
    }
    out
}
