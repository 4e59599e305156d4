//! bitio/reader.rs
//!
//! Buffered single-bit reader, MSB first within each byte.

use std::io::Read;

use crate::constants::WORD_BYTES;
use crate::types::HuffError;
use crate::utils::read_full;

/// Yields one bit at a time from a buffered source.
///
/// A refill that comes back short marks the final buffer; once that buffer is
/// consumed `read_bit` reports end of input with `Ok(None)`.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    source: R,
    buffer: Vec<u8>,
    /// Next byte to consume.
    cursor: usize,
    /// Bytes returned by the most recent refill.
    filled: usize,
    /// Next bit within `buffer[cursor]`, 0 = MSB.
    bit: u8,
    final_buffer: bool,
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R, capacity: usize) -> Result<Self, HuffError> {
        if capacity == 0 {
            return Err(HuffError::InvalidConfig("bit reader needs at least one byte".into()));
        }
        Ok(Self {
            source,
            buffer: vec![0u8; capacity],
            cursor: 0,
            filled: 0,
            bit: 0,
            final_buffer: false,
            bytes_read: 0,
        })
    }

    /// Next bit (0 or 1), or `None` at genuine end of input.
    pub fn read_bit(&mut self) -> Result<Option<u8>, HuffError> {
        if self.cursor >= self.filled {
            if self.final_buffer || !self.refill()? {
                return Ok(None);
            }
        }

        let bit = (self.buffer[self.cursor] >> (7 - self.bit)) & 1;
        self.bit += 1;
        if self.bit == 8 {
            self.bit = 0;
            self.cursor += 1;
        }
        Ok(Some(bit))
    }

    /// Bytes pulled from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// True when every byte read so far has been consumed and they add up to
    /// whole writer words.
    pub fn at_word_boundary(&self) -> bool {
        self.bit == 0 && self.cursor >= self.filled && self.bytes_read % WORD_BYTES as u64 == 0
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Returns false when the source had nothing left.
    fn refill(&mut self) -> Result<bool, HuffError> {
        let n = read_full(&mut self.source, &mut self.buffer)?;
        self.filled = n;
        self.cursor = 0;
        self.bit = 0;
        self.bytes_read += n as u64;
        if n < self.buffer.len() {
            self.final_buffer = true;
        }
        Ok(n > 0)
    }
}
