//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Attendance session reconstruction.
///
/// Reads raw punch dumps from a biometric terminal and reconstructs clean
/// per-user, per-day attendance sessions.
#[derive(Debug, Parser)]
#[command(name = "attlog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconstruct sessions and print them as a table (or JSON).
    Report {
        /// Punch dump file or directory of .jsonl dumps.
        #[arg(long)]
        events: Option<PathBuf>,

        /// JSON file mapping user IDs to display names.
        #[arg(long)]
        users: Option<PathBuf>,

        /// First day to include (YYYY-MM-DD). Applied only together with --end.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD). Applied only together with --start.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized punch stream as JSON lines, for diagnostics.
    Events {
        /// Punch dump file or directory of .jsonl dumps.
        #[arg(long)]
        events: Option<PathBuf>,

        /// JSON file mapping user IDs to display names.
        #[arg(long)]
        users: Option<PathBuf>,

        /// First day to include (YYYY-MM-DD). Applied only together with --end.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD). Applied only together with --start.
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}
