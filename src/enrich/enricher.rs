//! Species folder scanning and clip download loop.

use super::{ClipPolicy, StagedClip};
use crate::archive::ArchiveSource;
use crate::audio::measure_duration;
use crate::constants::clips::STAGING_PREFIX;
use crate::error::{Error, Result};
use crate::output::progress;
use crate::utils::fs::sanitize_filename;
use crate::utils::reference::species_dir;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// State of a species folder before enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderState {
    /// Folder has at least one entry; left alone.
    Populated,
    /// Folder exists with no entries besides leftover staging files.
    Empty,
    /// Nothing exists at the folder path.
    Missing,
    /// Something other than a directory occupies the folder path.
    NotADirectory,
}

/// Classify the folder at `path`.
///
/// `temp_*` files left by an interrupted run do not count as content.
pub fn folder_state(path: &Path) -> Result<FolderState> {
    if !path.exists() {
        return Ok(FolderState::Missing);
    }
    if !path.is_dir() {
        return Ok(FolderState::NotADirectory);
    }
    if stale_staging_files(path)?.1 {
        Ok(FolderState::Populated)
    } else {
        Ok(FolderState::Empty)
    }
}

/// Staging files in `folder`, and whether anything else is present.
fn stale_staging_files(folder: &Path) -> Result<(Vec<PathBuf>, bool)> {
    let mut staged = Vec::new();
    let mut has_content = false;
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        if entry.path().is_file()
            && entry
                .file_name()
                .to_string_lossy()
                .starts_with(STAGING_PREFIX)
        {
            staged.push(entry.path());
        } else {
            has_content = true;
        }
    }
    Ok((staged, has_content))
}

/// Delete staging files left behind by a killed run.
fn remove_stale_staging(folder: &Path) -> Result<()> {
    for path in stale_staging_files(folder)?.0 {
        debug!("Removing leftover {}", path.display());
        std::fs::remove_file(&path)?;
    }
    Ok(())
}

/// Result of fetching clips for one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesOutcome {
    /// The archive returned no download links.
    NoCandidates,
    /// At least one clip was kept.
    Populated {
        /// Clips kept.
        kept: usize,
        /// Downloads rejected.
        rejected: usize,
    },
    /// Downloads were attempted but none were kept.
    StillEmpty {
        /// Downloads rejected.
        rejected: usize,
    },
}

/// Totals over an enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    /// Species in the name mapping.
    pub scanned: usize,
    /// Species whose folder already had content.
    pub already_populated: usize,
    /// Species that gained at least one clip.
    pub populated: usize,
    /// Species that were fetched but kept nothing.
    pub still_empty: usize,
    /// Species with no download links.
    pub no_candidates: usize,
    /// Species skipped because their folder path is not a directory.
    pub skipped: usize,
    /// Clips kept across all species.
    pub clips_kept: usize,
    /// Downloads rejected across all species.
    pub clips_rejected: usize,
}

impl EnrichSummary {
    fn record(&mut self, outcome: SpeciesOutcome) {
        match outcome {
            SpeciesOutcome::NoCandidates => self.no_candidates += 1,
            SpeciesOutcome::Populated { kept, rejected } => {
                self.populated += 1;
                self.clips_kept += kept;
                self.clips_rejected += rejected;
            }
            SpeciesOutcome::StillEmpty { rejected } => {
                self.still_empty += 1;
                self.clips_rejected += rejected;
            }
        }
    }
}

/// Fetch short clips for one species into `folder`.
///
/// Links are tried in order. Each download is staged, measured, and then
/// either renamed to `<name>_<n>.<ext>` or deleted. Iteration stops once
/// `max_clips` are kept or `max_consecutive_rejects` downloads in a row
/// were rejected. Files that cannot be measured count as rejects.
pub async fn enrich_species<S: ArchiveSource>(
    source: &S,
    name: &str,
    folder: &Path,
    policy: &ClipPolicy,
) -> Result<SpeciesOutcome> {
    let candidates = source.search(name).await?;
    if candidates.is_empty() {
        info!("No audio links found for {name}.");
        return Ok(SpeciesOutcome::NoCandidates);
    }

    let stem = sanitize_filename(name);
    let mut kept = 0;
    let mut rejected = 0;
    let mut consecutive_rejects = 0;

    for (index, url) in candidates.iter().enumerate() {
        if !policy.should_continue(kept, consecutive_rejects) {
            break;
        }

        let extension = policy.extension_for(url);
        let staged = StagedClip::new(folder.join(format!(
            "{STAGING_PREFIX}{stem}_{}.{extension}",
            index + 1
        )));

        debug!("Fetching {url}");
        source.fetch(url, staged.path()).await?;

        match measure_duration(staged.path()) {
            Ok(duration) if policy.accepts(duration) => {
                let file_name = format!("{stem}_{}.{extension}", kept + 1);
                staged.promote(&folder.join(&file_name))?;
                kept += 1;
                consecutive_rejects = 0;
                info!("Downloaded {file_name} ({:.1}s)", duration.as_secs_f64());
            }
            Ok(duration) => {
                staged.discard()?;
                rejected += 1;
                consecutive_rejects += 1;
                info!(
                    "Skipped {stem}_{}.{extension} due to duration {:.1}s > {:.1}s",
                    index + 1,
                    duration.as_secs_f64(),
                    policy.max_duration.as_secs_f64()
                );
            }
            Err(e) => {
                staged.discard()?;
                rejected += 1;
                consecutive_rejects += 1;
                warn!("Skipped {url}: {e}");
            }
        }
    }

    if consecutive_rejects >= policy.max_consecutive_rejects {
        debug!("Gave up on {name} after {consecutive_rejects} consecutive rejects");
    }

    Ok(if kept > 0 {
        SpeciesOutcome::Populated { kept, rejected }
    } else {
        SpeciesOutcome::StillEmpty { rejected }
    })
}

/// Backfill every empty or missing species folder under `destination_dir`.
///
/// Species are processed one at a time in code order. Folders that already
/// hold files are left untouched. Network and filesystem errors abort the
/// run, as does a code that is not a single folder name.
pub async fn enrich<S: ArchiveSource>(
    source: &S,
    names: &BTreeMap<String, String>,
    destination_dir: &Path,
    policy: &ClipPolicy,
    progress_enabled: bool,
) -> Result<EnrichSummary> {
    std::fs::create_dir_all(destination_dir).map_err(|e| Error::DirCreateFailed {
        path: destination_dir.to_path_buf(),
        source: e,
    })?;

    let species_progress = progress::create_species_progress(names.len(), progress_enabled);
    let mut summary = EnrichSummary::default();

    for (code, name) in names {
        summary.scanned += 1;
        progress::set_progress_message(species_progress.as_ref(), code);
        let folder = species_dir(destination_dir, code)?;

        match folder_state(&folder)? {
            FolderState::Populated => {
                debug!("Skipping {code} (already populated)");
                summary.already_populated += 1;
                progress::inc_progress(species_progress.as_ref());
                continue;
            }
            FolderState::NotADirectory => {
                warn!("Skipping {code}: {} is not a directory", folder.display());
                summary.skipped += 1;
                progress::inc_progress(species_progress.as_ref());
                continue;
            }
            FolderState::Missing => {
                info!("Bird species not found: {code}");
                std::fs::create_dir_all(&folder).map_err(|e| Error::DirCreateFailed {
                    path: folder.clone(),
                    source: e,
                })?;
            }
            FolderState::Empty => {
                info!("Empty folder found for bird species: {code}");
                remove_stale_staging(&folder)?;
            }
        }

        let outcome = enrich_species(source, name, &folder, policy).await?;
        summary.record(outcome);
        progress::inc_progress(species_progress.as_ref());
    }

    progress::finish_progress(species_progress, "Complete");

    info!(
        "Complete: {} species scanned, {} populated, {} still empty, {} without links, {} already populated ({} clips kept, {} rejected)",
        summary.scanned,
        summary.populated,
        summary.still_empty,
        summary.no_candidates,
        summary.already_populated,
        summary.clips_kept,
        summary.clips_rejected
    );

    if summary.skipped > 0 {
        warn!("{} species skipped", summary.skipped);
    }

    Ok(summary)
}
