//! Reference file reading utilities.
//!
//! Two CSV shapes are supported: a headerless code list for the
//! reconciler and a headered `taxon_code,name` mapping for the enricher.
//! Uses the `csv` crate, which also strips a leading UTF-8 BOM.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

/// Internal record for name-mapping deserialization.
#[derive(Debug, Deserialize)]
struct NameRecord {
    taxon_code: String,
    name: String,
}

/// Check that `code` names exactly one folder.
///
/// Separators, `.`, `..` and absolute paths are rejected so a code can
/// never resolve outside the directory it is joined to.
pub fn validate_code(code: &str) -> Result<()> {
    let mut components = Path::new(code).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == code
    );

    if single && !code.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(Error::InvalidTaxonCode {
            code: code.to_string(),
        })
    }
}

/// Folder for `code` directly under `root`.
pub fn species_dir(root: &Path, code: &str) -> Result<PathBuf> {
    validate_code(code)?;
    Ok(root.join(code))
}

/// Read the set of taxon codes from a headerless CSV file.
///
/// # File Format
/// - No header row
/// - The code is the first column; further columns are ignored
/// - Rows with an empty first column are skipped
/// - A code that is not a single folder name is an error
pub fn read_code_set(path: &Path) -> Result<BTreeSet<String>> {
    let read_err = |e| Error::ReferenceRead {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_err)?;

    let mut codes = BTreeSet::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        if let Some(code) = record.get(0).filter(|c| !c.is_empty()) {
            validate_code(code)?;
            codes.insert(code.to_string());
        }
    }

    Ok(codes)
}

/// Read the code → display-name mapping from a headered CSV file.
///
/// # File Format
/// - Header row containing `taxon_code` and `name`; other columns ignored
/// - A later row for the same code replaces an earlier one
/// - Rows with an empty code are skipped
/// - A code that is not a single folder name is an error
pub fn read_name_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let read_err = |e| Error::ReferenceRead {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_err)?;

    let mut names = BTreeMap::new();
    for record in reader.deserialize::<NameRecord>() {
        let record = record.map_err(read_err)?;
        if !record.taxon_code.is_empty() {
            validate_code(&record.taxon_code)?;
            names.insert(record.taxon_code, record.name);
        }
    }

    Ok(names)
}
