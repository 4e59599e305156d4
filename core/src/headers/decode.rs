//! headers/decode.rs
//!
//! Header deserialization and validation.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::compression::FrequencyTable;
use crate::constants::header_layout::{ENTRY_LEN, LEN_PREFIX, MAX_BLOB_LEN};
use crate::headers::types::{HeaderEntry, HeaderError};
use crate::types::HuffError;
use crate::utils::read_full;

/// Split a blob into entries without validating their contents.
pub fn parse_entries(blob: &[u8]) -> Result<Vec<HeaderEntry>, HeaderError> {
    if blob.len() % ENTRY_LEN != 0 {
        return Err(HeaderError::MisalignedBlob { len: blob.len(), entry: ENTRY_LEN });
    }
    Ok(blob
        .chunks_exact(ENTRY_LEN)
        .map(|c| HeaderEntry::new(c[0], LittleEndian::read_u64(&c[1..])))
        .collect())
}

/// Inverse of `encode_header_le`.
///
/// Rejects misaligned blobs, duplicate symbols, zero counts and totals that
/// overflow u64.
pub fn decode_header_le(blob: &[u8]) -> Result<FrequencyTable, HeaderError> {
    let mut table = FrequencyTable::new();
    let mut total = 0u64;

    for entry in parse_entries(blob)? {
        if entry.count == 0 {
            return Err(HeaderError::ZeroCount { symbol: entry.symbol });
        }
        total = total.checked_add(entry.count).ok_or(HeaderError::CountOverflow)?;
        if table.insert(entry.symbol, entry.count).is_some() {
            return Err(HeaderError::DuplicateSymbol { symbol: entry.symbol });
        }
    }

    Ok(table)
}

/// Read the length prefix and blob from `r`. Returns the table and bytes consumed.
pub fn read_header<R: Read + ?Sized>(r: &mut R) -> Result<(FrequencyTable, u64), HuffError> {
    let mut prefix = [0u8; LEN_PREFIX];
    let got = read_full(r, &mut prefix)?;
    if got < LEN_PREFIX {
        return Err(HeaderError::Truncated { have: got, need: LEN_PREFIX }.into());
    }

    let declared = LittleEndian::read_u64(&prefix);
    if declared > MAX_BLOB_LEN as u64 {
        return Err(HeaderError::LengthOverflow { declared, max: MAX_BLOB_LEN }.into());
    }

    let need = declared as usize;
    let mut blob = vec![0u8; need];
    let got = read_full(r, &mut blob)?;
    if got < need {
        return Err(HeaderError::Truncated { have: got, need }.into());
    }

    let table = decode_header_le(&blob)?;
    debug!(entries = table.len(), blob_len = need, "read header");
    Ok((table, (LEN_PREFIX + need) as u64))
}
