//! constants.rs
//! Wire-format widths and buffer defaults shared by every layer.

/// Width in bits of one bit-writer word.
pub const WORD_BITS: u32 = 64;

/// Width in bytes of one bit-writer word on the wire.
pub const WORD_BYTES: usize = (WORD_BITS / 8) as usize;

/// Longest code the writer can emit, guard bit included.
pub const MAX_CODE_LEN: u32 = WORD_BITS;

/// Defaults when `CodecConfig` is not customised.
pub const DEFAULT_WRITER_WORDS: usize = 512; // 4 KiB
pub const DEFAULT_READER_BYTES: usize = 4 * 1024; // 4 KiB

/// Sanity bound on either buffer (64 MiB).
pub const MAX_BUFFER_BYTES: usize = 64 * 1024 * 1024;

/// Number of distinct byte values.
pub const SYMBOL_COUNT: usize = 256;

/// Header framing.
pub mod header_layout {
    /// Little-endian u64 length prefix in front of the header blob.
    pub const LEN_PREFIX: usize = 8;
    /// One `(symbol: u8, count: u64 LE)` entry.
    pub const ENTRY_LEN: usize = 1 + 8;
    /// Largest legal blob: one entry per byte value.
    pub const MAX_BLOB_LEN: usize = super::SYMBOL_COUNT * ENTRY_LEN;
}
