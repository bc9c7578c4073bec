use anyhow::{Context, Result};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;
use wildscan::{file_reader, Automaton};

use crate::cli_utils::{format_bytes, format_number, resolve_config, OffsetWriter};
use crate::PatternOptions;

pub fn cmd_scan(
    pattern: String,
    mut inputs: Vec<PathBuf>,
    options: PatternOptions,
    skip_whitespace: bool,
    delimiter: String,
    show_stats: bool,
) -> Result<()> {
    let config = resolve_config(&options)?;

    let build_start = Instant::now();
    let automaton = Automaton::with_config(pattern.as_bytes(), &config)
        .with_context(|| format!("Failed to compile pattern '{}'", pattern))?;
    let build_time = build_start.elapsed();

    if show_stats {
        let stats = automaton.stats();
        eprintln!("[INFO] Pattern: {} bytes, {} segments", stats.pattern_len, stats.segment_count);
        eprintln!(
            "[INFO] Automaton: {} states, {:?} table ({})",
            format_number(stats.state_count as u64),
            stats.table,
            format_bytes(stats.table_bytes as u64)
        );
        eprintln!("[INFO] Build time: {:.2}ms", build_time.as_secs_f64() * 1000.0);
    }

    if inputs.is_empty() {
        inputs.push(PathBuf::from("-"));
    }
    let labelled = inputs.len() > 1;

    let stdout = io::stdout();
    let mut writer = OffsetWriter::new(BufWriter::new(stdout.lock()), &delimiter);
    let mut matcher = automaton.matcher();
    let mut total_bytes = 0u64;
    let scan_start = Instant::now();

    for input in &inputs {
        let reader = file_reader::open(input)
            .with_context(|| format!("Failed to open input: {}", input.display()))?;

        matcher.reset();
        let label = input.display().to_string();
        writer.begin_line(labelled.then_some(label.as_str()))?;
        let fed = file_reader::scan_reader(reader, &mut matcher, skip_whitespace, |offset| {
            writer.write_offset(offset)
        })
        .with_context(|| format!("Failed to read input: {}", input.display()))?;
        writer.end_line()?;

        log::debug!("{}: {} bytes scanned", input.display(), fed);
        total_bytes += fed;
    }
    writer.flush()?;

    if show_stats {
        let elapsed = scan_start.elapsed().as_secs_f64();
        eprintln!("[INFO] Inputs: {}", inputs.len());
        eprintln!("[INFO] Scanned: {}", format_bytes(total_bytes));
        eprintln!("[INFO] Matches: {}", format_number(writer.count()));
        if elapsed > 0.0 {
            eprintln!(
                "[INFO] Throughput: {}/s",
                format_bytes((total_bytes as f64 / elapsed) as u64)
            );
        }
    }

    Ok(())
}
