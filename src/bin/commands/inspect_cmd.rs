use anyhow::{Context, Result};
use serde_json::json;
use wildscan::Automaton;

use crate::cli_utils::{display_bytes, format_bytes, format_number, resolve_config};
use crate::PatternOptions;

pub fn cmd_inspect(pattern: String, options: PatternOptions, json_output: bool) -> Result<()> {
    let config = resolve_config(&options)?;
    let automaton = Automaton::with_config(pattern.as_bytes(), &config)
        .with_context(|| format!("Failed to compile pattern '{}'", pattern))?;
    let stats = automaton.stats();

    if json_output {
        let segments: Vec<_> = automaton
            .segments()
            .iter()
            .map(|s| {
                json!({
                    "text": display_bytes(s.bytes()),
                    "start": s.start_offset(),
                    "end": s.end_offset(),
                })
            })
            .collect();
        let output = json!({
            "pattern": pattern,
            "config": config,
            "stats": stats,
            "segments": segments,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Pattern:   {}", pattern);
        println!("Wildcard:  '{}'", config.wildcard.escape_ascii());
        println!("Mode:      {:?}", config.match_mode);
        println!();
        println!("Segments:  {}", stats.segment_count);
        for (id, segment) in automaton.segments().iter().enumerate() {
            println!(
                "  #{:<4} {:>6}..={:<6} {}",
                id,
                segment.start_offset(),
                segment.end_offset(),
                display_bytes(segment.bytes())
            );
        }
        if stats.segment_count == 0 {
            println!("  (none - every window of {} bytes matches)", stats.pattern_len);
        }
        println!();
        println!("Automaton:");
        println!("  States:          {}", format_number(stats.state_count as u64));
        println!("  Terminal states: {}", format_number(stats.terminal_states as u64));
        println!("  Output entries:  {}", format_number(stats.output_entries as u64));
        println!(
            "  Table:           {:?} ({})",
            stats.table,
            format_bytes(stats.table_bytes as u64)
        );
        println!("  Output index:    {}", format_bytes(stats.output_bytes as u64));
    }

    Ok(())
}
