//! CLI argument parsing and option resolution.

mod args;
mod resolve;

pub use args::{Cli, Command, ConfigAction, EnrichArgs, ReconcileArgs};
pub use resolve::{EnrichPlan, ReconcilePlan, resolve_enrich, resolve_reconcile};
