//! Append-only log of species codes with no source folder.

use crate::constants::missing_log::{MESSAGE, TIMESTAMP_FORMAT};
use crate::error::{Error, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Handle to the missing-species log file.
#[derive(Debug)]
pub struct MissingLog {
    path: PathBuf,
    file: File,
}

impl MissingLog {
    /// Open the log for appending, creating it and its parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        let write_err = |e| Error::MissingLogWrite {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Append one timestamped line for a missing species code.
    pub fn record(&mut self, code: &str) -> Result<()> {
        warn!("{MESSAGE}: {code}");

        let line = format!(
            "{} - {MESSAGE}: {code}\n",
            Local::now().format(TIMESTAMP_FORMAT)
        );
        self.file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|e| Error::MissingLogWrite {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
