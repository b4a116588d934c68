//! In-flight download files.
//!
//! A download lands in a staging file inside the species folder and is
//! either promoted to a kept clip or deleted. A staging file left behind
//! would make the folder look populated on the next run, so every staging
//! path is registered until it is resolved and a Ctrl+C handler can clear
//! whatever is still registered.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// RAII guard for a staging file.
///
/// Dropping the guard removes the file unless it was promoted with
/// [`StagedClip::promote`].
#[derive(Debug)]
pub struct StagedClip {
    path: PathBuf,
    resolved: bool,
}

impl StagedClip {
    /// Register a staging path. The file itself is created by the caller.
    pub fn new(path: PathBuf) -> Self {
        register_staged(&path);
        Self {
            path,
            resolved: false,
        }
    }

    /// Path of the staging file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the staging file to its final name.
    pub fn promote(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).map_err(|e| Error::ClipStore {
            from: self.path.clone(),
            to: target.to_path_buf(),
            source: e,
        })?;
        self.resolved = true;
        unregister_staged(&self.path);
        Ok(())
    }

    /// Delete the staging file.
    pub fn discard(mut self) -> Result<()> {
        let result = fs::remove_file(&self.path);
        self.resolved = true;
        unregister_staged(&self.path);
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

impl Drop for StagedClip {
    fn drop(&mut self) {
        if !self.resolved {
            let _ = fs::remove_file(&self.path);
            unregister_staged(&self.path);
        }
    }
}

/// Global registry of staging paths for cleanup on signal.
static STAGED_CLIPS: std::sync::LazyLock<std::sync::Mutex<Vec<PathBuf>>> =
    std::sync::LazyLock::new(|| std::sync::Mutex::new(Vec::new()));

fn register_staged(path: &Path) {
    if let Ok(mut staged) = STAGED_CLIPS.lock() {
        staged.push(path.to_path_buf());
    }
}

fn unregister_staged(path: &Path) {
    if let Ok(mut staged) = STAGED_CLIPS.lock() {
        staged.retain(|p| p != path);
    }
}

/// Remove all registered staging files. Called on signal.
pub fn cleanup_all_staged() {
    if let Ok(staged) = STAGED_CLIPS.lock() {
        for path in staged.iter() {
            let _ = fs::remove_file(path);
        }
    }
}
