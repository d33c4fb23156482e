// src/cli/mod.rs — CLI definition (clap derive)

pub mod export;
pub mod mine;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "epiminer",
    about = "Frequent episode mining over trace event sequences",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mine frequent episodes from a JSON Lines trace file
    Mine(MineArgs),
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args, Clone, Debug)]
pub struct MineArgs {
    /// Input file, one JSON record per line ("-" for stdin)
    pub input: String,

    /// How records are turned into symbols
    #[arg(short, long, value_enum, default_value = "event")]
    pub key: KeyKind,

    /// Only mine these thread ids (repeatable); implies --per-thread
    #[arg(short, long = "thread")]
    pub threads: Vec<i64>,

    /// Mine each thread's records as a separate sequence
    #[arg(long)]
    pub per_thread: bool,

    /// Mine threads concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Minimum occurrences of a single symbol
    #[arg(long)]
    pub min_frequency: Option<usize>,

    /// Minimum non-overlapping occurrences of an episode
    #[arg(long)]
    pub min_support: Option<usize>,

    /// Longest episode to search for
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Report every frequent episode, not only maximal ones
    #[arg(long)]
    pub emit_all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also save a JSON copy under the data directory
    #[arg(long)]
    pub save: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// Records are events, keyed by name
    Event,
    /// Records are critical-path edges, keyed by endpoints and type
    Edge,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_defaults() {
        let cli = Cli::try_parse_from(["epiminer", "mine", "trace.jsonl"]).unwrap();
        let Commands::Mine(args) = cli.command else {
            panic!("expected mine");
        };
        assert_eq!(args.input, "trace.jsonl");
        assert_eq!(args.key, KeyKind::Event);
        assert_eq!(args.format, OutputFormat::Table);
        assert!(args.threads.is_empty());
        assert!(args.min_support.is_none());
    }

    #[test]
    fn test_mine_overrides() {
        let cli = Cli::try_parse_from([
            "epiminer",
            "--verbose",
            "mine",
            "edges.jsonl",
            "--key",
            "edge",
            "-t",
            "1234",
            "-t",
            "42",
            "--min-support",
            "8",
            "--max-length",
            "5",
            "--emit-all",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Mine(args) = cli.command else {
            panic!("expected mine");
        };
        assert_eq!(args.key, KeyKind::Edge);
        assert_eq!(args.threads, vec![1234, 42]);
        assert_eq!(args.min_support, Some(8));
        assert_eq!(args.max_length, Some(5));
        assert!(args.emit_all);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        assert!(Cli::try_parse_from(["epiminer", "mine", "x", "--min-support", "-1"]).is_err());
    }
}
