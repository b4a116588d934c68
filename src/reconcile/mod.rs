//! Reconciliation of species folders against a reference code set.

mod missing_log;
mod reconciler;

pub use missing_log::MissingLog;
pub use reconciler::{ReconcileOptions, ReconcileReport, reconcile};
