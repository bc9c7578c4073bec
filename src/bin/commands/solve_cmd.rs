use anyhow::{Context, Result};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use wildscan::{file_reader, Automaton};

use crate::cli_utils::{resolve_config, OffsetWriter};
use crate::PatternOptions;

/// Pattern-then-text input: the first whitespace-delimited token is the
/// pattern, every later byte above 0x20 is text.
pub fn cmd_solve(input: PathBuf, options: PatternOptions) -> Result<()> {
    let config = resolve_config(&options)?;

    let mut reader = file_reader::open(&input)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;
    let pattern = file_reader::read_token(&mut reader).context("Failed to read pattern")?;
    log::debug!("pattern: {} bytes", pattern.len());

    let automaton = Automaton::with_config(&pattern, &config).context("Failed to compile pattern")?;
    let mut matcher = automaton.matcher();

    let stdout = io::stdout();
    let mut writer = OffsetWriter::new(BufWriter::new(stdout.lock()), " ");
    file_reader::scan_reader(reader, &mut matcher, true, |offset| {
        writer.write_offset(offset)
    })
    .context("Failed to read text")?;
    writer.end_line()?;
    writer.flush()?;

    Ok(())
}
