//! bitio/writer.rs
//!
//! Word-buffered bit writer.
//!
//! Design notes:
//! - Codes accumulate in the low bits of the current word; `flush()` left-aligns the
//!   final partial word so the unused low bits become zero padding.
//! - A code that does not fit the current word is split across two words.
//! - Padding is always shorter than one word (0..=63 bits).

use std::io::Write;

use byteorder::{BigEndian, ByteOrder};
use tracing::trace;

use crate::constants::{WORD_BITS, WORD_BYTES};
use crate::types::HuffError;

#[inline]
fn low_mask(length: u32) -> u64 {
    if length >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << length) - 1
    }
}

/// Packs variable-width codes into a sink, `WORD_BITS` at a time.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    words: Vec<u64>,
    /// Index of the word currently being filled.
    index: usize,
    /// Bits used in `words[index]`; always < WORD_BITS between calls.
    offset: u32,
    /// Serialization scratch, reused across flushes.
    scratch: Vec<u8>,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a writer holding `capacity_words` words before it must drain to `sink`.
    pub fn new(sink: W, capacity_words: usize) -> Result<Self, HuffError> {
        if capacity_words == 0 {
            return Err(HuffError::InvalidConfig("bit writer needs at least one word".into()));
        }
        Ok(Self {
            sink,
            words: vec![0u64; capacity_words],
            index: 0,
            offset: 0,
            scratch: vec![0u8; capacity_words * WORD_BYTES],
            bytes_written: 0,
        })
    }

    /// Append the low `length` bits of `value`, MSB first.
    pub fn write_bits(&mut self, value: u64, length: u32) -> Result<(), HuffError> {
        if length == 0 || length > WORD_BITS {
            return Err(HuffError::InvalidBitLength { length });
        }
        let value = value & low_mask(length);
        let free = WORD_BITS - self.offset;

        if length < free {
            let word = &mut self.words[self.index];
            *word = (*word << length) | value;
            self.offset += length;
            return Ok(());
        }

        if length == free {
            let word = &mut self.words[self.index];
            // free == WORD_BITS only when the word is still empty
            *word = if free == WORD_BITS { value } else { (*word << length) | value };
            return self.advance();
        }

        // Split: the high part closes this word, the rest opens the next one.
        let rest = length - free;
        let word = &mut self.words[self.index];
        *word = (*word << free) | (value >> rest);
        self.advance()?;
        self.words[self.index] = value & low_mask(rest);
        self.offset = rest;
        Ok(())
    }

    /// Pad the pending partial word with zeros and write everything out.
    ///
    /// Returns the number of padding bits appended. Must be called once after the
    /// last `write_bits` of a session or the final partial word is lost.
    pub fn flush(&mut self) -> Result<u32, HuffError> {
        if self.index == 0 && self.offset == 0 {
            return Ok(0);
        }

        let (count, padding) = if self.offset > 0 {
            let padding = WORD_BITS - self.offset;
            self.words[self.index] <<= padding;
            (self.index + 1, padding)
        } else {
            (self.index, 0)
        };

        self.drain(count)?;
        self.sink.flush()?;
        trace!(padding, total = self.bytes_written, "bit writer flushed");
        Ok(padding)
    }

    /// Total bytes physically written to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Bits buffered and not yet written.
    pub fn pending_bits(&self) -> u64 {
        self.index as u64 * WORD_BITS as u64 + self.offset as u64
    }

    /// Recover the sink. Pending bits are discarded; call `flush()` first.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn advance(&mut self) -> Result<(), HuffError> {
        self.index += 1;
        self.offset = 0;
        if self.index == self.words.len() {
            self.drain(self.words.len())?;
        }
        Ok(())
    }

    fn drain(&mut self, count: usize) -> Result<(), HuffError> {
        let len = count * WORD_BYTES;
        BigEndian::write_u64_into(&self.words[..count], &mut self.scratch[..len]);
        self.sink.write_all(&self.scratch[..len])?;
        self.bytes_written += len as u64;
        trace!(words = count, "bit writer drained");

        self.words.iter_mut().for_each(|w| *w = 0);
        self.index = 0;
        self.offset = 0;
        Ok(())
    }
}
