//! compression/mod.rs
//! Canonical Huffman codec engine.
//!
//! Notes:
//! - Static order-0 coding: the whole input is analysed before encoding starts.
//! - Tree construction is deterministic, so the decoder rebuilds the encoder's
//!   tree from the header counts alone.
//! - Codes carry a leading guard bit; see `compressor` for how it terminates the body.

pub mod types;
pub mod frequency;
pub mod tree;
pub mod table;
pub mod compressor;

pub use types::*;
pub use frequency::*;
pub use tree::*;
pub use table::*;
pub use compressor::*;
