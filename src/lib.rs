//! Wildscan - Streaming Wildcard Substring Matching
//!
//! Wildscan finds every occurrence of a pattern containing single-byte
//! wildcards (`?` by default) in a text delivered as a stream, in
//! `O(n + m + Z)` time: `n` text bytes, `m` pattern bytes, and `Z` occurrences
//! of the pattern's literal segments.
//!
//! # Quick Start
//!
//! ```rust
//! use wildscan::WildcardPattern;
//!
//! let pattern = WildcardPattern::new("ab??aba")?;
//! assert_eq!(pattern.find_all("ababacaba"), vec![2]);
//! # Ok::<(), wildscan::WildscanError>(())
//! ```
//!
//! # Streaming
//!
//! ```rust
//! use wildscan::Automaton;
//!
//! let automaton = Automaton::build(b"a?c", b'?')?;
//! let mut matcher = automaton.matcher();
//! let mut offsets = Vec::new();
//! for chunk in [&b"ab"[..], b"cax", b"c"] {
//!     matcher.feed_slice(chunk, &mut offsets);
//! }
//! assert_eq!(offsets, vec![0, 3]);
//! # Ok::<(), wildscan::WildscanError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! pattern ──► Segmenter ──► (segment, end_offset)*
//!                                 │
//!                                 ▼
//!                     Aho-Corasick builder
//!          trie ─► failure links ─► goto completion
//!                                 │
//!                                 ▼
//!            Automaton (transition table + output index)
//!                                 │
//! text bytes ──► StreamMatcher (sliding vote window) ──► match offsets
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// Aho-Corasick construction
pub mod ac_builder;
/// Completed automaton
pub mod automaton;
/// Matcher configuration
pub mod config;
/// Error types for wildscan operations
pub mod error;
pub mod file_reader;
pub mod matcher;
pub mod output;
pub mod pattern;
pub mod segment;
pub mod transition;

// Re-exports for Rust consumers
pub use crate::ac_builder::AutomatonBuilder;
pub use crate::automaton::{Automaton, AutomatonStats};
pub use crate::config::{EmptyPatternPolicy, MatchMode, MatcherConfig, TableKind};
pub use crate::error::{Result, WildscanError};
pub use crate::matcher::{FindIter, StreamMatcher};
pub use crate::pattern::WildcardPattern;
pub use crate::segment::Segment;
pub use crate::transition::{StateId, Transitions};

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
