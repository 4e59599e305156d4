//! headers/mod.rs
//! Symbol-count header that lets a decoder rebuild the encoder's tree.
//!
//! Notes:
//! - Only counts travel; the decoder reruns the same tree builder over them, so
//!   neither the tree nor the codes are ever transmitted.
//! - Layout: `[blob_len: u64 LE][ (symbol: u8, count: u64 LE) * n ]`.
//! - Entries are emitted in ascending symbol order; any order is accepted back.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
