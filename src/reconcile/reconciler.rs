//! Copy matching species folders and create placeholders for the rest.

use super::MissingLog;
use crate::error::{Error, Result};
use crate::utils::fs::copy_dir_recursive;
use crate::utils::reference::species_dir;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};

/// Locations used by a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Directory holding existing `<code>/` folders.
    pub source_dir: PathBuf,
    /// Directory receiving one `<code>/` folder per reference code.
    pub destination_dir: PathBuf,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Codes whose source folder was copied.
    pub copied: Vec<String>,
    /// Codes with no source folder; an empty destination folder was created.
    pub missing: Vec<String>,
}

/// Reconcile the destination tree against the reference codes.
///
/// Every code ends up with exactly one folder under the destination
/// directory. Codes without a source folder get an empty folder and one
/// line in the missing-species log. The first copy failure aborts the run.
/// A code that is not a single folder name fails the run before anything
/// is written.
pub fn reconcile(
    codes: &BTreeSet<String>,
    options: &ReconcileOptions,
    log: &mut MissingLog,
) -> Result<ReconcileReport> {
    if !options.source_dir.is_dir() {
        return Err(Error::SourceDirNotFound {
            path: options.source_dir.clone(),
        });
    }

    let targets = codes
        .iter()
        .map(|code| Ok((code, species_dir(&options.destination_dir, code)?)))
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(&options.destination_dir).map_err(|e| Error::DirCreateFailed {
        path: options.destination_dir.clone(),
        source: e,
    })?;

    let mut report = ReconcileReport::default();

    for (code, to) in targets {
        let from = options.source_dir.join(code);

        if from.is_dir() {
            let files = copy_dir_recursive(&from, &to).map_err(|e| Error::CopyFailed {
                from: from.clone(),
                to: to.clone(),
                source: e,
            })?;
            debug!("Copied {code} ({files} file(s))");
            report.copied.push(code.clone());
        } else {
            std::fs::create_dir_all(&to).map_err(|e| Error::DirCreateFailed {
                path: to.clone(),
                source: e,
            })?;
            log.record(code)?;
            report.missing.push(code.clone());
        }
    }

    info!(
        "Reconciled {} species: {} copied, {} missing (logged to {})",
        codes.len(),
        report.copied.len(),
        report.missing.len(),
        log.path().display()
    );

    Ok(report)
}
