//! Configuration type definitions.

use crate::constants::{archive, clips, paths};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File and directory locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Clip acceptance limits.
    #[serde(default)]
    pub enrich: EnrichConfig,

    /// Remote archive settings.
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// File and directory locations used by both stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding existing per-species folders.
    pub source_dir: PathBuf,

    /// Directory receiving reconciled per-species folders.
    pub destination_dir: PathBuf,

    /// Headerless CSV of taxon codes.
    pub codes_file: PathBuf,

    /// Headered CSV mapping `taxon_code` to `name`.
    pub names_file: PathBuf,

    /// Append-only log of codes without a source folder.
    pub missing_log: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(paths::SOURCE_DIR),
            destination_dir: PathBuf::from(paths::DESTINATION_DIR),
            codes_file: PathBuf::from(paths::CODES_FILE),
            names_file: PathBuf::from(paths::NAMES_FILE),
            missing_log: PathBuf::from(paths::MISSING_LOG),
        }
    }
}

/// Limits applied while backfilling species folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Maximum kept clips per species.
    pub max_clips: usize,

    /// Consecutive rejects after which a species is abandoned.
    pub max_consecutive_rejects: usize,

    /// Longest kept clip, in milliseconds.
    pub max_clip_duration_ms: u64,

    /// Extension for downloads whose URL has no audio extension.
    pub default_extension: String,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            max_clips: clips::MAX_CLIPS,
            max_consecutive_rejects: clips::MAX_CONSECUTIVE_REJECTS,
            max_clip_duration_ms: clips::MAX_DURATION_MS,
            default_extension: clips::DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Remote archive settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Archive base URL, also used to resolve relative links.
    pub base_url: String,

    /// Search page path relative to the base URL.
    pub search_path: String,

    /// Substring identifying download links on the search page.
    pub link_marker: String,

    /// Connect timeout in seconds (client default when unset).
    pub connect_timeout_secs: Option<u64>,

    /// Total request timeout in seconds (client default when unset).
    pub timeout_secs: Option<u64>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: archive::BASE_URL.to_string(),
            search_path: archive::SEARCH_PATH.to_string(),
            link_marker: archive::LINK_MARKER.to_string(),
            connect_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

impl ArchiveConfig {
    /// Connect timeout as a [`Duration`], if configured.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// Total request timeout as a [`Duration`], if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
