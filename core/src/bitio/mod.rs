//! bitio/mod.rs
//! Bit-level reader and writer for the compressed body.
//!
//! Notes:
//! - Bits are MSB-first within each byte; writer words go out big-endian, so the
//!   byte stream is identical on every platform.
//! - The writer buffers whole 64-bit words and only touches the sink when the
//!   buffer fills or on `flush()`.
//! - The reader distinguishes a genuine end of input from a short read.

pub mod reader;
pub mod writer;

pub use reader::*;
pub use writer::*;
