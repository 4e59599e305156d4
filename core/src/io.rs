// ## Normalized sources and sinks for the codec

use std::io::{Cursor, Read, Seek, Write};
use std::path::PathBuf;

use crate::types::HuffError;

/// A source that can be read and rewound; compression makes two passes.
pub trait RewindRead: Read + Seek {}

impl<T: Read + Seek> RewindRead for T {}

/// Canonical input abstraction
pub enum InputSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    File(PathBuf),
}

/// Normalize input source into a boxed rewindable reader
pub fn open_input(src: InputSource) -> Result<Box<dyn RewindRead + Send>, HuffError> {
    let reader: Box<dyn RewindRead + Send> = match src {
        InputSource::File(p) => Box::new(std::fs::File::open(p)?),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer
pub fn open_output(sink: OutputSink) -> Result<Box<dyn Write + Send>, HuffError> {
    let writer: Box<dyn Write + Send> = match sink {
        OutputSink::File(p) => Box::new(std::fs::File::create(p)?),
    };
    Ok(writer)
}
