//! Owned wildcard pattern
//!
//! [`WildcardPattern`] pairs the source pattern with its compiled automaton,
//! for callers that just want answers about whole texts.
//!
//! ```
//! use wildscan::WildcardPattern;
//!
//! let pattern = WildcardPattern::new("ab??aba")?;
//! assert_eq!(pattern.find_all("ababacaba"), vec![2]);
//! assert!(pattern.is_match("xxababacaba"));
//! assert!(!pattern.is_match("abab"));
//! # Ok::<(), wildscan::WildscanError>(())
//! ```

use crate::automaton::Automaton;
use crate::config::MatcherConfig;
use crate::error::Result;
use crate::matcher::StreamMatcher;
use std::fmt;

/// A compiled wildcard pattern
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: Vec<u8>,
    automaton: Automaton,
}

impl WildcardPattern {
    /// Compile with the default configuration (`?` wildcard)
    pub fn new<P: AsRef<[u8]>>(pattern: P) -> Result<Self> {
        Self::with_config(pattern, &MatcherConfig::default())
    }

    /// Compile with an explicit configuration
    pub fn with_config<P: AsRef<[u8]>>(pattern: P, config: &MatcherConfig) -> Result<Self> {
        let pattern = pattern.as_ref().to_vec();
        let automaton = Automaton::with_config(&pattern, config)?;
        Ok(Self { pattern, automaton })
    }

    /// Original pattern bytes
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// The compiled automaton
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Fresh streaming matcher
    pub fn matcher(&self) -> StreamMatcher<'_> {
        self.automaton.matcher()
    }

    /// All match start offsets in `text`
    pub fn find_all<T: AsRef<[u8]>>(&self, text: T) -> Vec<u64> {
        self.automaton.match_all(text.as_ref())
    }

    /// First match start offset, stopping as soon as it is confirmed
    pub fn find_first<T: AsRef<[u8]>>(&self, text: T) -> Option<u64> {
        self.matcher()
            .find_iter(text.as_ref().iter().copied())
            .next()
    }

    /// True if the pattern occurs anywhere in `text`
    pub fn is_match<T: AsRef<[u8]>>(&self, text: T) -> bool {
        self.find_first(text).is_some()
    }

    /// Number of occurrences in `text`
    pub fn count<T: AsRef<[u8]>>(&self, text: T) -> usize {
        self.matcher()
            .find_iter(text.as_ref().iter().copied())
            .count()
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.pattern))
    }
}
