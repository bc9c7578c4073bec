//! Pattern segmentation.
//!
//! A wildcard pattern is split into its maximal runs of literal bytes. Each
//! run remembers where it ends inside the pattern, which is what lets the
//! matcher line segment hits back up into whole-pattern candidates.
//!
//! ```
//! use wildscan::config::MatchMode;
//! use wildscan::segment::split_segments;
//!
//! let segments = split_segments(b"ab??aba", b'?', MatchMode::CaseSensitive);
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].bytes(), b"ab");
//! assert_eq!(segments[0].end_offset(), 1);
//! assert_eq!(segments[1].bytes(), b"aba");
//! assert_eq!(segments[1].end_offset(), 6);
//! ```

use crate::config::MatchMode;

/// A maximal run of non-wildcard bytes from a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    bytes: Vec<u8>,
    end_offset: usize,
}

impl Segment {
    /// Literal bytes of the segment (already case-folded)
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pattern index of the segment's last byte
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Pattern index of the segment's first byte
    pub fn start_offset(&self) -> usize {
        self.end_offset + 1 - self.bytes.len()
    }

    /// Segment length in bytes (never zero)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty runs are never emitted
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Split `pattern` into segments in left-to-right order.
///
/// An all-wildcard (or empty) pattern yields no segments.
pub fn split_segments(pattern: &[u8], wildcard: u8, mode: MatchMode) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;

    let mut close = |run: &[u8], end_offset: usize| {
        segments.push(Segment {
            bytes: run.iter().map(|&b| mode.fold(b)).collect(),
            end_offset,
        });
    };

    for wc in memchr::memchr_iter(wildcard, pattern) {
        if wc > start {
            close(&pattern[start..wc], wc - 1);
        }
        start = wc + 1;
    }
    if pattern.len() > start {
        close(&pattern[start..], pattern.len() - 1);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(pattern: &str) -> Vec<(String, usize)> {
        split_segments(pattern.as_bytes(), b'?', MatchMode::CaseSensitive)
            .into_iter()
            .map(|s| (String::from_utf8(s.bytes).unwrap(), s.end_offset))
            .collect()
    }

    #[test]
    fn test_no_wildcards() {
        assert_eq!(split("hello"), vec![("hello".to_string(), 4)]);
    }

    #[test]
    fn test_all_wildcards() {
        assert!(split("???").is_empty());
        assert!(split("").is_empty());
    }

    #[test]
    fn test_leading_and_trailing_wildcards() {
        assert_eq!(
            split("?ab?c??"),
            vec![("ab".to_string(), 2), ("c".to_string(), 4)]
        );
    }

    #[test]
    fn test_repeated_content_keeps_offsets() {
        assert_eq!(
            split("ab?ab"),
            vec![("ab".to_string(), 1), ("ab".to_string(), 4)]
        );
    }

    #[test]
    fn test_start_offset() {
        let segments = split_segments(b"??abc?d", b'?', MatchMode::CaseSensitive);
        assert_eq!(segments[0].start_offset(), 2);
        assert_eq!(segments[1].start_offset(), 6);
        assert_eq!(segments[1].len(), 1);
    }

    #[test]
    fn test_custom_wildcard_and_folding() {
        let segments = split_segments(b"AB.c?", b'.', MatchMode::CaseInsensitive);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].bytes(), b"ab");
        assert_eq!(segments[1].bytes(), b"c?");
        assert_eq!(segments[1].end_offset(), 4);
    }
}
