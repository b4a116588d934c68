//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reconcile bird-species audio folders and backfill missing species.
#[derive(Debug, Parser)]
#[command(name = "birdfill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: platform config directory).
    #[arg(long = "config", global = true, env = "BIRDFILL_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy listed species folders and create empty ones for missing codes.
    Reconcile(ReconcileArgs),
    /// Download short clips for species whose folder is empty or missing.
    Enrich(EnrichArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the reconcile command.
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Directory holding existing species folders.
    #[arg(long, env = "BIRDFILL_SOURCE")]
    pub source: Option<PathBuf>,

    /// Directory receiving one folder per taxon code.
    #[arg(long, env = "BIRDFILL_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Headerless CSV with the taxon code in the first column.
    #[arg(long, env = "BIRDFILL_CODES")]
    pub codes: Option<PathBuf>,

    /// Log file for codes without a source folder.
    #[arg(long, env = "BIRDFILL_MISSING_LOG")]
    pub missing_log: Option<PathBuf>,
}

/// Arguments for the enrich command.
#[derive(Debug, Args)]
pub struct EnrichArgs {
    /// Directory holding one folder per taxon code.
    #[arg(long, env = "BIRDFILL_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// CSV with `taxon_code` and `name` columns.
    #[arg(long, env = "BIRDFILL_NAMES")]
    pub names: Option<PathBuf>,

    /// Maximum clips kept per species.
    #[arg(long, env = "BIRDFILL_MAX_CLIPS", value_parser = parse_positive)]
    pub max_clips: Option<usize>,

    /// Consecutive rejected downloads before giving up on a species.
    #[arg(long, env = "BIRDFILL_MAX_REJECTS", value_parser = parse_positive)]
    pub max_rejects: Option<usize>,

    /// Longest clip kept, in milliseconds.
    #[arg(long, env = "BIRDFILL_MAX_DURATION_MS", value_parser = parse_positive_u64)]
    pub max_duration_ms: Option<u64>,

    /// Archive base URL.
    #[arg(long, env = "BIRDFILL_BASE_URL")]
    pub base_url: Option<String>,

    /// Disable the species progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

fn parse_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid count"))?;

    if value == 0 {
        return Err("value must be at least 1".to_string());
    }

    Ok(value)
}

fn parse_positive_u64(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("value must be at least 1".to_string());
    }

    Ok(value)
}
