use std::io::Read;

use tracing::debug;

use crate::compression::types::FrequencyTable;
use crate::types::HuffError;
use crate::utils::read_full;

/// Single pass over `source`, counting every byte.
///
/// Reads in `batch`-sized blocks until end of input. Returns the table and the
/// total length; empty input yields an empty table and 0.
pub fn analyse<R: Read + ?Sized>(source: &mut R, batch: usize) -> Result<(FrequencyTable, u64), HuffError> {
    let mut buf = vec![0u8; batch.max(1)];
    let mut counts = [0u64; 256];
    let mut total = 0u64;

    loop {
        let n = read_full(source, &mut buf)?;
        for &b in &buf[..n] {
            counts[b as usize] += 1;
        }
        total += n as u64;
        if n < buf.len() {
            break;
        }
    }

    let table: FrequencyTable = counts
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > 0)
        .map(|(s, c)| (s as u8, *c))
        .collect();

    debug_assert_eq!(table.total(), total);
    debug!(total, distinct = table.len(), "analysed input");
    Ok((table, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    #[test]
    fn counts_every_byte() {
        let (table, total) = analyse(&mut Cursor::new(b"abracadabra"), 3).unwrap();
        assert_eq!(total, 11);
        assert_eq!(table.get(b'a'), Some(5));
        assert_eq!(table.get(b'b'), Some(2));
        assert_eq!(table.get(b'r'), Some(2));
        assert_eq!(table.get(b'c'), Some(1));
        assert_eq!(table.get(b'd'), Some(1));
        assert_eq!(table.get(b'z'), None);
        assert_eq!(table.total(), total);
    }

    #[test]
    fn empty_input_is_empty_table() {
        let (table, total) = analyse(&mut Cursor::new(Vec::<u8>::new()), 16).unwrap();
        assert!(table.is_empty());
        assert_eq!(total, 0);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"))
        }
    }

    #[test]
    fn read_failure_propagates() {
        let err = analyse(&mut Broken, 8).unwrap_err();
        assert!(matches!(err, HuffError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied));
    }
}
