//! huff-core
//!
//! Lossless byte-stream compressor built on canonical Huffman coding.
//! Pure Rust, no FFI, no async runtime.
//!
//! ```
//! use huff_core::prelude::*;
//!
//! let codec = Compressor::default();
//! let packed = codec.compress_to_vec(b"abracadabra").unwrap();
//! assert_eq!(codec.decompress_to_vec(&packed).unwrap(), b"abracadabra");
//! ```

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod bitio;
pub mod compression;
pub mod headers;
pub mod io;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{Compressor, FrequencyTable, Node, Code, CodeTable, Symbol};
    pub use crate::io::{open_input, open_output, InputSource, OutputSink};
    pub use crate::telemetry::{Operation, Stage, TelemetrySnapshot};
    pub use crate::types::{CodecConfig, HuffError};
}
