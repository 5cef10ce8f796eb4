//! CLI command definitions and argument parsing.

use attendsure_poller::PollerConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// AttendSure CLI - Launch and track appointment confirmation calls.
#[derive(Debug, Parser)]
#[command(name = "attendsure")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (e.g., http://localhost:8000)
    #[arg(long, global = true, env = "ATTENDSURE_API_BASE")]
    pub api_base: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs and statuses only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch confirmation calls to patients
    Launch(LaunchArgs),

    /// Track calls until they finish (Ctrl+C stops)
    Watch(WatchArgs),

    /// Show one call with its outcome
    Show(ShowArgs),

    /// Normalize a stored analysis payload
    Extract(ExtractArgs),
}

/// Arguments for the launch command.
#[derive(Debug, Parser)]
pub struct LaunchArgs {
    /// Patient IDs to call
    #[arg(required = true)]
    pub patient_ids: Vec<i64>,

    /// Launch time (ISO-8601); immediate when omitted
    #[arg(short, long)]
    pub schedule_at: Option<String>,

    /// Track the launched calls until they finish
    #[arg(short, long)]
    pub watch: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Call IDs to track
    #[arg(required = true)]
    pub call_ids: Vec<i64>,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Poller overrides shared by `launch --watch` and `watch`.
#[derive(Debug, Clone, Default, Args)]
pub struct PollArgs {
    /// Delay between status fetches (milliseconds)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Give up after this many fetches
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Give up after this many seconds
    #[arg(long)]
    pub max_duration_secs: Option<u64>,
}

impl PollArgs {
    /// Apply the overrides on top of a base configuration.
    pub fn apply(&self, mut config: PollerConfig) -> PollerConfig {
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if self.max_attempts.is_some() {
            config.max_attempts = self.max_attempts;
        }
        if self.max_duration_secs.is_some() {
            config.max_duration_secs = self.max_duration_secs;
        }
        config
    }
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Call ID
    pub call_id: i64,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// File containing the payload; stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
