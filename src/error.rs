use thiserror::Error;

/// Errors raised at the boundary of table generation.
///
/// Table builders themselves are total over valid quadruples; anything that can go wrong is caught
/// when a `LengthQuadruple` is constructed or when the reference evaluator is handed a short buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("field {field} has width {width}, widths must be in [1, 8]")]
    InvalidWidth { field: usize, width: u8 },
    #[error("table index {0} is out of range, there are 4096 entries")]
    IndexOutOfRange(usize),
    #[error("buffer too short: needed {needed} bytes, got {actual}")]
    ShortBuffer { needed: usize, actual: usize },
}
