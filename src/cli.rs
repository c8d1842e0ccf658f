// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The deployed handlers are invoked by the function runtime; this CLI runs
//! the same handlers against an event file, which is how they are exercised
//! locally and in smoke tests.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `emr-relauncher`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "emr-relauncher",
    version,
    about = "Relaunch failed clusters and relay batch job status changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Optional settings file (TOML). Environment variables override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LOG_LEVEL` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Decide and build the payload, but log it instead of publishing.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Handle a cluster state-change event.
    Relaunch {
        /// Path to the event JSON.
        #[arg(long, value_name = "PATH")]
        event: String,

        /// Read records from this JSON array instead of the table.
        #[arg(long, value_name = "PATH")]
        records: Option<String>,
    },
    /// Handle an SNS-wrapped batch job state-change event.
    Notify {
        /// Path to the event JSON.
        #[arg(long, value_name = "PATH")]
        event: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
