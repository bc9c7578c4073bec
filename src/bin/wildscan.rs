mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wildscan::{EmptyPatternPolicy, TableKind};

use commands::{cmd_inspect, cmd_scan, cmd_solve};

#[derive(Parser)]
#[command(name = "wildscan")]
#[command(
    about = "Streaming wildcard substring search",
    long_about = "wildscan - Streaming wildcard substring search with an Aho-Corasick automaton\n\n\
    Finds every offset where a pattern with single-byte wildcards occurs in a text, \n\
    in one pass over the input and time linear in text plus pattern length.\n\n\
    Features:\n\
      • Single-byte wildcard (default '?', configurable)\n\
      • Streams arbitrarily large inputs, transparent .gz decompression\n\
      • Dense or sparse transition tables\n\
      • ASCII case-insensitive matching\n\n\
    Examples:\n\
      wildscan scan 'ab??aba' text.txt\n\
      wildscan scan -i 'err?r' app.log.gz --stats\n\
      wildscan solve < input.txt\n\
      wildscan inspect 'GET /??min' --json"
)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options that shape how a pattern is compiled
#[derive(Args, Debug, Clone)]
pub struct PatternOptions {
    /// JSON configuration file; flags below override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Wildcard character (ASCII)
    #[arg(short, long, value_name = "CHAR")]
    pub wildcard: Option<char>,

    /// ASCII case-insensitive matching
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Transition table representation
    #[arg(long, value_enum)]
    pub table: Option<TableKind>,

    /// What an empty pattern matches
    #[arg(long, value_enum)]
    pub empty_pattern: Option<EmptyPatternPolicy>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files or stdin for a wildcard pattern
    Scan {
        /// Pattern; the wildcard matches any single byte
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Files to scan, or "-" for stdin (default: stdin)
        #[arg(value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        options: PatternOptions,

        /// Drop whitespace and control bytes (<= 0x20) before matching
        #[arg(long)]
        skip_whitespace: bool,

        /// Separator printed between offsets
        #[arg(short, long, default_value = " ")]
        delimiter: String,

        /// Show scan statistics to stderr
        #[arg(short, long)]
        stats: bool,
    },

    /// Read a pattern token then text from one input, and print match offsets
    Solve {
        /// Input file, or "-" for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        options: PatternOptions,
    },

    /// Inspect the automaton built for a pattern
    Inspect {
        /// Pattern to compile
        #[arg(value_name = "PATTERN")]
        pattern: String,

        #[command(flatten)]
        options: PatternOptions,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Scan {
            pattern,
            inputs,
            options,
            skip_whitespace,
            delimiter,
            stats,
        } => cmd_scan(pattern, inputs, options, skip_whitespace, delimiter, stats),
        Commands::Solve { input, options } => cmd_solve(input, options),
        Commands::Inspect {
            pattern,
            options,
            json,
        } => cmd_inspect(pattern, options, json),
    }
}
