//! compression/compressor.rs
//!
//! Orchestrates analyse -> tree -> table -> header -> body for `compress`, and
//! header -> tree -> body for `decompress`.
//!
//! Design notes:
//! - Every call builds its own frequency table, tree and code table; nothing is
//!   cached on the `Compressor`.
//! - The first failure aborts the call. The sink may then hold a partial, invalid
//!   stream which the caller must discard.
//! - The body is self-terminating: each code starts with a `1` guard bit and the
//!   writer pads with zeros, so a `0` where a guard bit is expected ends decoding.
//! - The header counts sum to the input length; a body that decodes to any other
//!   number of symbols is rejected.

use std::fmt;
use std::io::{BufWriter, Cursor, Read, Seek, SeekFrom, Write};

use tracing::{debug, info, trace};

use crate::bitio::{BitReader, BitWriter};
use crate::compression::frequency::analyse;
use crate::compression::table::build_table;
use crate::compression::tree::{build_tree, Node};
use crate::compression::types::CodeTable;
use crate::headers::{read_header, write_header};
use crate::telemetry::{Operation, Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{CodecConfig, HuffError};
use crate::utils::read_full;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressState {
    Idle,
    Analyzed,
    TreeBuilt,
    TableBuilt,
    HeaderWritten,
    Encoding,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressState {
    Idle,
    HeaderRead,
    TreeRebuilt,
    Decoding,
    Done,
}

fn enter<S: fmt::Debug + Copy>(state: &mut S, next: S) {
    trace!(from = ?*state, to = ?next, "state transition");
    *state = next;
}

/// Canonical Huffman compressor/decompressor.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CodecConfig,
}

impl Compressor {
    pub fn new(config: CodecConfig) -> Result<Self, HuffError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `source` into `sink`.
    ///
    /// `source` is read twice: once to count symbols, then again from the start
    /// to encode them. Empty input fails with `EmptyTree` before anything is written.
    pub fn compress<R, W>(&self, source: &mut R, sink: &mut W) -> Result<TelemetrySnapshot, HuffError>
    where
        R: Read + Seek + ?Sized,
        W: Write + ?Sized,
    {
        let mut state = CompressState::Idle;
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();
        let batch = self.config.reader_bytes;

        let (table, total) = timer.time(Stage::Analyse, || analyse(&mut *source, batch))?;
        counters.bytes_input = total;
        enter(&mut state, CompressState::Analyzed);

        let root = timer.time(Stage::BuildTree, || build_tree(&table))?;
        enter(&mut state, CompressState::TreeBuilt);

        let codes = timer.time(Stage::BuildTable, || build_table(&root))?;
        enter(&mut state, CompressState::TableBuilt);

        let header_len = timer.time(Stage::WriteHeader, || write_header(&mut *sink, &table))?;
        counters.add_header(header_len, table.len());
        enter(&mut state, CompressState::HeaderWritten);

        source.seek(SeekFrom::Start(0))?;
        enter(&mut state, CompressState::Encoding);

        let writer_words = self.config.writer_words;
        let (symbols, body_len) = timer.time(Stage::Encode, || -> Result<(u64, u64), HuffError> {
            let mut writer = BitWriter::new(&mut *sink, writer_words)?;
            let symbols = encode_body(&mut *source, &codes, &mut writer, batch)?;
            let padding = writer.flush()?;
            debug!(symbols, padding, "encoded body");
            Ok((symbols, writer.bytes_written()))
        })?;
        counters.add_body(body_len, symbols);
        counters.bytes_output = header_len + body_len;
        enter(&mut state, CompressState::Done);

        timer.finish();
        let snapshot = TelemetrySnapshot::from(Operation::Compress, &counters, &timer);
        info!(
            input = snapshot.bytes_input,
            output = snapshot.bytes_output,
            factor = snapshot.compression_factor(),
            "compressed"
        );
        Ok(snapshot)
    }

    /// Decompress `source` into `sink`.
    pub fn decompress<R, W>(&self, source: &mut R, sink: &mut W) -> Result<TelemetrySnapshot, HuffError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut state = DecompressState::Idle;
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();

        let (table, header_len) = timer.time(Stage::ReadHeader, || read_header(&mut *source))?;
        counters.add_header(header_len, table.len());
        enter(&mut state, DecompressState::HeaderRead);

        let root = timer.time(Stage::BuildTree, || build_tree(&table))?;
        enter(&mut state, DecompressState::TreeRebuilt);

        enter(&mut state, DecompressState::Decoding);
        let reader_bytes = self.config.reader_bytes;
        let (symbols, body_len) = timer.time(Stage::Decode, || -> Result<(u64, u64), HuffError> {
            let mut reader = BitReader::new(&mut *source, reader_bytes)?;
            let mut out = BufWriter::with_capacity(reader_bytes, &mut *sink);
            let symbols = decode_body(&root, &mut reader, &mut out)?;
            out.flush()?;
            Ok((symbols, reader.bytes_read()))
        })?;
        let expected = table.total();
        if symbols < expected {
            return Err(HuffError::TruncatedStream);
        }
        if symbols > expected {
            return Err(HuffError::BodyOverrun { expected, decoded: symbols });
        }
        counters.add_body(body_len, symbols);
        counters.bytes_input = header_len + body_len;
        counters.bytes_output = symbols;
        enter(&mut state, DecompressState::Done);

        timer.finish();
        let snapshot = TelemetrySnapshot::from(Operation::Decompress, &counters, &timer);
        info!(input = snapshot.bytes_input, output = snapshot.bytes_output, "decompressed");
        Ok(snapshot)
    }

    /// Compress an in-memory buffer.
    pub fn compress_to_vec(&self, data: &[u8]) -> Result<Vec<u8>, HuffError> {
        let mut out = Vec::new();
        self.compress(&mut Cursor::new(data), &mut out)?;
        Ok(out)
    }

    /// Decompress an in-memory buffer.
    pub fn decompress_to_vec(&self, data: &[u8]) -> Result<Vec<u8>, HuffError> {
        let mut out = Vec::new();
        self.decompress(&mut Cursor::new(data), &mut out)?;
        Ok(out)
    }
}

/// Stream `source` through `codes` into `writer`. Returns symbols encoded.
///
/// Does not flush the writer.
pub fn encode_body<R, W>(
    source: &mut R,
    codes: &CodeTable,
    writer: &mut BitWriter<W>,
    batch: usize,
) -> Result<u64, HuffError>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut buf = vec![0u8; batch.max(1)];
    let mut symbols = 0u64;

    loop {
        let n = read_full(source, &mut buf)?;
        for &b in &buf[..n] {
            let code = codes.get(b).ok_or(HuffError::UnknownSymbol { symbol: b })?;
            writer.write_bits(code.value, code.length)?;
        }
        symbols += n as u64;
        if n < buf.len() {
            return Ok(symbols);
        }
    }
}

/// Decode guard-bit-prefixed codes against `root` until a `0` guard bit.
///
/// End of input where a guard bit is expected ends cleanly only on a word
/// boundary, where the body filled its last word exactly. Anywhere else, and
/// after a `1` guard bit, it is `TruncatedStream`. Returns symbols written.
pub fn decode_body<R, W>(root: &Node, reader: &mut BitReader<R>, sink: &mut W) -> Result<u64, HuffError>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut symbols = 0u64;

    loop {
        match reader.read_bit()? {
            Some(1) => {}
            Some(_) => return Ok(symbols),
            None if reader.at_word_boundary() => return Ok(symbols),
            None => return Err(HuffError::TruncatedStream),
        }

        let mut node = root;
        let symbol = loop {
            match node {
                Node::Leaf { symbol, .. } => break *symbol,
                Node::Internal { left, right, .. } => {
                    node = match reader.read_bit()? {
                        Some(0) => left.as_ref(),
                        Some(_) => right.as_ref(),
                        None => return Err(HuffError::TruncatedStream),
                    };
                }
            }
        };

        sink.write_all(&[symbol])?;
        symbols += 1;
    }
}
