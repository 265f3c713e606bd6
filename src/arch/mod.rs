//! Architecture-specific utility code.

pub(crate) mod shuffle;
