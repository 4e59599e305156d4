use thiserror::Error;

use crate::compression::Symbol;

/// One `(symbol, count)` pair of the header blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderEntry {
    pub symbol: Symbol,
    pub count: u64,
}

impl HeaderEntry {
    pub fn new(symbol: Symbol, count: u64) -> Self {
        Self { symbol, count }
    }
}

/// Every way a header can be corrupt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Fewer bytes available than the prefix or blob requires.
    #[error("header truncated: have {have} bytes, need {need}")]
    Truncated { have: usize, need: usize },

    /// Declared blob length beyond the largest possible header.
    #[error("declared header length {declared} exceeds maximum {max}")]
    LengthOverflow { declared: u64, max: usize },

    /// Blob length is not a whole number of entries.
    #[error("header blob of {len} bytes is not a multiple of {entry}")]
    MisalignedBlob { len: usize, entry: usize },

    #[error("symbol 0x{symbol:02x} appears more than once")]
    DuplicateSymbol { symbol: Symbol },

    #[error("symbol 0x{symbol:02x} has a zero count")]
    ZeroCount { symbol: Symbol },

    /// Counts sum past u64::MAX.
    #[error("symbol counts overflow a 64-bit total")]
    CountOverflow,
}
