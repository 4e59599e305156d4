//! telemetry/counters.rs
//! Mutable counters filled in while a compress/decompress call runs.
use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Bytes consumed from the source.
    pub bytes_input: u64,
    /// Bytes written to the sink.
    pub bytes_output: u64,
    /// Length prefix plus header blob.
    pub bytes_header: u64,
    /// Bit-packed body bytes.
    pub bytes_body: u64,
    pub symbols_distinct: u64,
    /// Symbols encoded or decoded.
    pub symbols_coded: u64,
}

impl TelemetryCounters {
    /// Record the header as written or read.
    pub fn add_header(&mut self, header_len: u64, distinct: usize) {
        self.bytes_header += header_len;
        self.symbols_distinct = distinct as u64;
    }

    /// Record the body and the symbols it carries.
    pub fn add_body(&mut self, body_len: u64, symbols: u64) {
        self.bytes_body += body_len;
        self.symbols_coded += symbols;
    }

    /// Header plus body; what the compressed form costs.
    pub fn compressed_bytes(&self) -> u64 {
        self.bytes_header + self.bytes_body
    }
}
