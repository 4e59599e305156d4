use std::io;
use thiserror::Error;

use crate::constants::{DEFAULT_READER_BYTES, DEFAULT_WRITER_WORDS, MAX_BUFFER_BYTES, WORD_BYTES};
use crate::headers::HeaderError;

/// Unified codec error covering I/O, header, tree and bitstream failures.
/// - `From<T>` impls enable `?` across every phase.
/// - No variant is retried; the orchestrator surfaces the first one it sees.
#[derive(Debug, Error)]
pub enum HuffError {
    /// Read/write failure from a source or sink (never clean end-of-input).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Zero distinct symbols: nothing to build a tree from.
    #[error("invalid tree: no symbols to build from")]
    EmptyTree,

    /// Header blob or its length prefix is malformed.
    #[error("corrupt header: {0}")]
    Header(#[from] HeaderError),

    /// Body ended mid-symbol, off a word boundary, or short of the header total.
    #[error("truncated compressed stream")]
    TruncatedStream,

    /// Body decoded to more symbols than the header counts.
    #[error("body holds {decoded} symbols, header counts {expected}")]
    BodyOverrun { expected: u64, decoded: u64 },

    /// Tree depth produced a code wider than the bit writer's word.
    #[error("code overflow: symbol 0x{symbol:02x} needs {length} bits, max is {max}")]
    CodeOverflow { symbol: u8, length: u32, max: u32 },

    /// `write_bits` called with a width outside 1..=64.
    #[error("invalid bit length: {length}")]
    InvalidBitLength { length: u32 },

    /// Source produced a byte the code table has no entry for (source changed between passes).
    #[error("symbol 0x{symbol:02x} missing from code table")]
    UnknownSymbol { symbol: u8 },

    /// Rejected buffer configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Buffer sizing for one compress/decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Capacity of the bit writer, in 64-bit words.
    pub writer_words: usize,
    /// Capacity of the bit reader, in bytes.
    pub reader_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            writer_words: DEFAULT_WRITER_WORDS,
            reader_bytes: DEFAULT_READER_BYTES,
        }
    }
}

impl CodecConfig {
    pub fn new(writer_words: usize, reader_bytes: usize) -> Self {
        Self { writer_words, reader_bytes }
    }

    pub fn validate(&self) -> Result<(), HuffError> {
        if self.writer_words == 0 {
            return Err(HuffError::InvalidConfig("writer_words must be > 0".into()));
        }
        if self.reader_bytes == 0 {
            return Err(HuffError::InvalidConfig("reader_bytes must be > 0".into()));
        }
        if self.writer_words.saturating_mul(WORD_BYTES) > MAX_BUFFER_BYTES {
            return Err(HuffError::InvalidConfig(format!(
                "writer buffer {} words exceeds {} bytes",
                self.writer_words, MAX_BUFFER_BYTES
            )));
        }
        if self.reader_bytes > MAX_BUFFER_BYTES {
            return Err(HuffError::InvalidConfig(format!(
                "reader buffer {} bytes exceeds {} bytes",
                self.reader_bytes, MAX_BUFFER_BYTES
            )));
        }
        Ok(())
    }
}
