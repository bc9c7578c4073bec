use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use wildscan::{MatchMode, MatcherConfig};

use crate::PatternOptions;

/// Resolve the matcher configuration: config file first, then flag overrides
pub fn resolve_config(options: &PatternOptions) -> Result<MatcherConfig> {
    let mut config = match &options.config {
        Some(path) => MatcherConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => MatcherConfig::default(),
    };

    if let Some(c) = options.wildcard {
        if !c.is_ascii() {
            bail!("Wildcard must be an ASCII character, got '{}'", c);
        }
        config.wildcard = c as u8;
    }
    if options.ignore_case {
        config.match_mode = MatchMode::CaseInsensitive;
    }
    if let Some(table) = options.table {
        config.table = table;
    }
    if let Some(policy) = options.empty_pattern {
        config.empty_pattern = policy;
    }

    config.validate().context("Invalid matcher configuration")?;
    log::debug!("matcher config: {:?}", config);
    Ok(config)
}

/// Writes offsets separated by a delimiter, one line per stream
pub struct OffsetWriter<W: Write> {
    out: W,
    delimiter: Vec<u8>,
    first: bool,
    count: u64,
}

impl<W: Write> OffsetWriter<W> {
    pub fn new(out: W, delimiter: &str) -> Self {
        Self {
            out,
            delimiter: delimiter.as_bytes().to_vec(),
            first: true,
            count: 0,
        }
    }

    /// Start a line with a label (used when scanning several inputs)
    pub fn begin_line(&mut self, label: Option<&str>) -> io::Result<()> {
        self.first = true;
        if let Some(label) = label {
            write!(self.out, "{}:", label)?;
        }
        Ok(())
    }

    pub fn write_offset(&mut self, offset: u64) -> io::Result<()> {
        if !self.first {
            self.out.write_all(&self.delimiter)?;
        }
        self.first = false;
        self.count += 1;
        write!(self.out, "{}", offset)
    }

    pub fn end_line(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Offsets written since creation
    pub fn count(&self) -> u64 {
        self.count
    }
}

pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Pattern bytes rendered for humans, non-printables escaped
pub fn display_bytes(bytes: &[u8]) -> String {
    bytes.escape_ascii().to_string()
}
