//! Matcher configuration.
//!
//! Every knob that changes how a pattern is compiled or how the text stream is
//! interpreted lives in [`MatcherConfig`]. The struct is serde-enabled so the
//! CLI can load it from a JSON file and override individual fields from flags.
//!
//! ```
//! use wildscan::config::{MatcherConfig, MatchMode, TableKind};
//!
//! let config = MatcherConfig::from_json(r#"{ "wildcard": "_", "table": "sparse" }"#)?;
//! assert_eq!(config.wildcard, b'_');
//! assert_eq!(config.table, TableKind::Sparse);
//! assert_eq!(config.match_mode, MatchMode::CaseSensitive);
//! # Ok::<(), wildscan::WildscanError>(())
//! ```

use crate::error::{Result, WildscanError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default wildcard byte
pub const DEFAULT_WILDCARD: u8 = b'?';

/// Default upper bound on pattern length in bytes
pub const DEFAULT_MAX_PATTERN_LEN: usize = 1 << 20;

/// Matching mode for the automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-sensitive matching
    #[default]
    CaseSensitive,
    /// ASCII case-insensitive matching
    CaseInsensitive,
}

impl MatchMode {
    /// Normalize a single byte according to this mode
    #[inline]
    pub fn fold(self, byte: u8) -> u8 {
        match self {
            MatchMode::CaseSensitive => byte,
            MatchMode::CaseInsensitive => byte.to_ascii_lowercase(),
        }
    }
}

/// Backing representation of the completed transition function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// One flat `states x 256` array, one load per byte
    #[default]
    Dense,
    /// Per-state sorted edge lists, edges to root omitted
    Sparse,
}

/// What an empty pattern matches
///
/// An empty pattern has no natural answer; the historical behavior is to
/// report one match per text byte (offsets `0..n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum EmptyPatternPolicy {
    /// Report a match at every text offset `0..n`
    #[default]
    EveryPosition,
    /// Never report a match
    Never,
}

/// Configuration for building a wildcard automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// Pattern byte that matches any single text byte
    #[serde(with = "ascii_char")]
    pub wildcard: u8,
    /// Case handling for pattern and text
    pub match_mode: MatchMode,
    /// Transition table representation
    pub table: TableKind,
    /// Behavior for zero-length patterns
    pub empty_pattern: EmptyPatternPolicy,
    /// Patterns longer than this are rejected before any allocation
    pub max_pattern_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            wildcard: DEFAULT_WILDCARD,
            match_mode: MatchMode::default(),
            table: TableKind::default(),
            empty_pattern: EmptyPatternPolicy::default(),
            max_pattern_len: DEFAULT_MAX_PATTERN_LEN,
        }
    }
}

impl MatcherConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            WildscanError::Io(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<()> {
        if self.match_mode == MatchMode::CaseInsensitive && self.wildcard.is_ascii_alphabetic() {
            return Err(WildscanError::InvalidConfig(format!(
                "wildcard '{}' is a letter, which is ambiguous under case-insensitive matching",
                self.wildcard as char
            )));
        }
        Ok(())
    }
}

/// Serialize a byte as a one-character string so configs read naturally.
mod ascii_char {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(byte: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(*byte as char)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let c = char::deserialize(deserializer)?;
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(D::Error::custom(format!("wildcard must be ASCII, got {:?}", c)))
        }
    }
}
