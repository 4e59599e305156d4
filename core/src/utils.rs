use std::io::{self, Read};

/// Read until `buf` is full or the source reports end of input.
///
/// Returns the number of bytes read; less than `buf.len()` only at end of input.
/// `Interrupted` is retried, every other error is propagated.
pub fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut n = 0;
    while n < buf.len() {
        match r.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(k) => n += k,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(n)
}

/// Render bytes as dash-separated binary, e.g. `-10101011-11110000-`.
pub fn fmt_bits(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(1 + bytes.len() * 9);
    out.push('-');
    for b in bytes {
        out.push_str(&format!("{:08b}-", b));
    }
    out
}

/// Output size as a percentage of input size (0 when input is empty).
pub fn compression_factor(input: u64, output: u64) -> f64 {
    if input == 0 {
        return 0.0;
    }
    (output as f64 * 100.0) / input as f64
}
