//! Birdfill - bird-species audio folder reconciliation and backfill.
//!
//! Two independent stages operate on a destination tree with one folder
//! per taxon code: [`reconcile`] fills it from an existing tree, and
//! [`enrich`] downloads short clips for species that are still empty.

#![warn(missing_docs)]

pub mod archive;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod enrich;
pub mod error;
pub mod output;
pub mod reconcile;
pub mod utils;

use archive::XenoCanto;
use clap::Parser;
use cli::{Cli, Command, ConfigAction, EnrichArgs, ReconcileArgs};
use config::{Config, load_config, save_default_config, validate_config};
use reconcile::MissingLog;
use std::path::Path;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for birdfill CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    // Clear in-flight downloads so an interrupted species stays empty
    if let Err(e) = ctrlc::set_handler(|| {
        enrich::cleanup_all_staged();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    let config_path = cli.config_file.as_deref();

    match cli.command {
        Command::Config { action } => handle_config_command(action, config_path),
        Command::Reconcile(args) => {
            let config = load_validated_config(config_path)?;
            run_reconcile(args, &config)
        }
        Command::Enrich(args) => {
            let config = load_validated_config(config_path)?;
            run_enrich(args, &config, cli.quiet)
        }
    }
}

fn load_validated_config(path: Option<&Path>) -> Result<Config> {
    let config = load_config(path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Run the reconciler.
fn run_reconcile(args: ReconcileArgs, config: &Config) -> Result<()> {
    let plan = cli::resolve_reconcile(args, config);

    info!("Loading taxon codes: {}", plan.codes_file.display());
    let codes = utils::reference::read_code_set(&plan.codes_file)?;
    info!("{} taxon code(s) loaded", codes.len());

    let mut log = MissingLog::open(&plan.missing_log)?;
    let report = reconcile::reconcile(&codes, &plan.options, &mut log)?;

    info!(
        "Selected bird folders copied to {}",
        plan.options.destination_dir.display()
    );
    if !report.missing.is_empty() {
        info!(
            "{} missing species logged and empty folders created",
            report.missing.len()
        );
    }

    Ok(())
}

/// Run the enricher.
fn run_enrich(args: EnrichArgs, config: &Config, quiet: bool) -> Result<()> {
    let plan = cli::resolve_enrich(args, config, quiet)?;

    info!("Loading species names: {}", plan.names_file.display());
    let names = utils::reference::read_name_map(&plan.names_file)?;
    info!("{} species loaded", names.len());

    let source = XenoCanto::from_config(&plan.archive)?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    let summary = runtime.block_on(enrich::enrich(
        &source,
        &names,
        &plan.destination_dir,
        &plan.policy,
        plan.progress,
    ))?;

    if summary.still_empty + summary.no_candidates > 0 {
        warn!(
            "{} species still have no clips",
            summary.still_empty + summary.no_candidates
        );
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // HTTP client internals stay quiet unless -vv is given.
    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info,reqwest=warn,hyper=warn",
            1 => "debug,reqwest=info,hyper=info",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config::resolve_config_path(explicit)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default(), Some(&path))?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  birdfill reconcile --source <dir> --destination <dir> --codes <csv>");
                println!("  birdfill enrich --destination <dir> --names <csv>");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(explicit)?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config::resolve_config_path(explicit)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
