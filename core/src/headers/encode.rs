//! headers/encode.rs
//!
//! Header serialization.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::debug;

use crate::compression::FrequencyTable;
use crate::constants::header_layout::ENTRY_LEN;
use crate::headers::types::HeaderEntry;
use crate::types::HuffError;

/// Header entries for `table`, ascending by symbol.
pub fn header_entries(table: &FrequencyTable) -> Vec<HeaderEntry> {
    table.iter().map(|(symbol, count)| HeaderEntry::new(symbol, count)).collect()
}

/// Serialize `table` into the header blob (no length prefix).
pub fn encode_header_le(table: &FrequencyTable) -> Vec<u8> {
    let mut blob = Vec::with_capacity(table.len() * ENTRY_LEN);
    for entry in header_entries(table) {
        blob.push(entry.symbol);
        blob.extend_from_slice(&entry.count.to_le_bytes());
    }
    debug_assert_eq!(blob.len(), table.len() * ENTRY_LEN);
    blob
}

/// Write the length prefix and blob to `w`. Returns bytes written.
pub fn write_header<W: Write + ?Sized>(w: &mut W, table: &FrequencyTable) -> Result<u64, HuffError> {
    let blob = encode_header_le(table);
    w.write_u64::<LittleEndian>(blob.len() as u64)?;
    w.write_all(&blob)?;

    let written = 8 + blob.len() as u64;
    debug!(entries = table.len(), blob_len = blob.len(), "wrote header");
    Ok(written)
}
