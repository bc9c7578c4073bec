//! Streaming input with automatic gzip decompression
//!
//! Helpers that feed byte sources into a [`StreamMatcher`] without ever
//! holding the whole text in memory. Files ending in `.gz` are decompressed
//! on the fly and the path `-` means stdin.
//!
//! # Example
//!
//! ```rust,no_run
//! use wildscan::{file_reader, Automaton};
//!
//! let automaton = Automaton::build(b"GET /?dmin", b'?')?;
//! let mut matcher = automaton.matcher();
//! let reader = file_reader::open("access.log.gz")?;
//! file_reader::scan_reader(reader, &mut matcher, false, |offset| {
//!     println!("{}", offset);
//!     Ok(())
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::matcher::StreamMatcher;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader};
use std::path::Path;

/// Buffer size for file reading (128KB)
const BUFFER_SIZE: usize = 128 * 1024;

/// Bytes at or below this value count as whitespace/control when skipping
const WHITESPACE_MAX: u8 = b' ';

/// Open a file with automatic gzip detection based on file extension
///
/// Files ending in `.gz` (case-insensitive) are decompressed. The path `-`
/// reads from stdin.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();

    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let file = File::open(path)?;
    let is_gzip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    Ok(from_file(file, is_gzip))
}

/// Wrap an already-opened file, decompressing if `is_gzip` is set
pub fn from_file(file: File, is_gzip: bool) -> Box<dyn BufRead + Send> {
    if is_gzip {
        Box::new(BufReader::with_capacity(BUFFER_SIZE, GzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(BUFFER_SIZE, file))
    }
}

/// Feed everything `reader` yields into `matcher`, calling `on_match` with
/// each confirmed start offset.
///
/// With `skip_whitespace`, bytes `<= 0x20` are dropped before matching and do
/// not count toward offsets. Returns the number of bytes fed to the matcher.
/// The matcher is not reset, so successive calls continue one stream.
pub fn scan_reader<R, F>(
    mut reader: R,
    matcher: &mut StreamMatcher<'_>,
    skip_whitespace: bool,
    mut on_match: F,
) -> io::Result<u64>
where
    R: BufRead,
    F: FnMut(u64) -> io::Result<()>,
{
    let mut fed = 0u64;
    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        for &byte in buffer {
            if skip_whitespace && byte <= WHITESPACE_MAX {
                continue;
            }
            fed += 1;
            if let Some(offset) = matcher.feed(byte) {
                on_match(offset)?;
            }
        }
        let consumed = buffer.len();
        reader.consume(consumed);
    }
    Ok(fed)
}

/// Read one whitespace-delimited token, skipping leading whitespace.
///
/// The delimiter after the token is consumed. Returns an empty vector at EOF.
pub fn read_token<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut token = Vec::new();
    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            return Ok(token);
        }

        let mut consumed = 0;
        let mut done = false;
        for &byte in buffer {
            consumed += 1;
            if byte <= WHITESPACE_MAX {
                if !token.is_empty() {
                    done = true;
                    break;
                }
            } else {
                token.push(byte);
            }
        }
        reader.consume(consumed);
        if done {
            return Ok(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Automaton;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn scan_all<R: BufRead>(reader: R, pattern: &[u8], skip: bool) -> (Vec<u64>, u64) {
        let automaton = Automaton::build(pattern, b'?').unwrap();
        let mut matcher = automaton.matcher();
        let mut found = Vec::new();
        let fed = scan_reader(reader, &mut matcher, skip, |o| {
            found.push(o);
            Ok(())
        })
        .unwrap();
        (found, fed)
    }

    #[test]
    fn test_plain_text_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "ababacaba").unwrap();
        file.flush().unwrap();

        let (found, fed) = scan_all(open(file.path()).unwrap(), b"ab??aba", false);
        assert_eq!(found, vec![2]);
        assert_eq!(fed, 9);
    }

    #[test]
    fn test_gzip_file() {
        let mut file = tempfile::Builder::new().suffix(".GZ").tempfile().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        write!(encoder, "xxabcxxabc").unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file.flush().unwrap();

        let (found, _) = scan_all(open(file.path()).unwrap(), b"a?c", false);
        assert_eq!(found, vec![2, 7]);
    }

    #[test]
    fn test_from_file_explicit_gzip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        write!(encoder, "aaa").unwrap();
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file.flush().unwrap();

        let reader = from_file(File::open(file.path()).unwrap(), true);
        let (found, _) = scan_all(reader, b"a", false);
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn test_skip_whitespace() {
        let text = Cursor::new(b"ab ab\n acaba\n".to_vec());
        let (found, fed) = scan_all(text, b"ab??aba", true);
        assert_eq!(found, vec![2]);
        assert_eq!(fed, 9);
    }

    #[test]
    fn test_small_buffer_chunks() {
        // A tiny BufReader forces matches to span fill_buf boundaries
        let reader = BufReader::with_capacity(2, Cursor::new(b"abcabcabc".to_vec()));
        let (found, _) = scan_all(reader, b"c?b", false);
        assert_eq!(found, vec![2, 5]);
    }

    #[test]
    fn test_read_token() {
        let mut reader = BufReader::with_capacity(3, Cursor::new(b"  \n ab??aba\nababacaba".to_vec()));
        assert_eq!(read_token(&mut reader).unwrap(), b"ab??aba");
        assert_eq!(read_token(&mut reader).unwrap(), b"ababacaba");
        assert!(read_token(&mut reader).unwrap().is_empty());
    }
}
