//! CLI parse: clap types for loomwright. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// loomwright - derive and maintain floor-loom mechanizations for drawdowns
#[derive(Parser)]
#[command(name = "loomwright")]
#[command(about = "Derive threading, treadling and tie-up for weaving drawdowns")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/ is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer threading, treadling and tie-up for a drawdown file
    Mechanize {
        /// Drawdown file (one pick per line)
        draft: PathBuf,
        /// Minimum frames (overrides config)
        #[arg(long)]
        min_frames: Option<usize>,
        /// Minimum treadles (overrides config)
        #[arg(long)]
        min_treadles: Option<usize>,
        /// Keep unused frames and treadles
        #[arg(long)]
        no_compact: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the drawdown a saved mechanization weaves
    Weave {
        /// Mechanization JSON (as written by `mechanize --format json`)
        loom: PathBuf,
    },
    /// Compare a drawdown with a saved mechanization
    Check {
        /// Drawdown file
        draft: PathBuf,
        /// Mechanization JSON
        loom: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
