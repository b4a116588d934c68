//! Clip acceptance policy.

use crate::config::EnrichConfig;
use crate::constants::clips::AUDIO_EXTENSIONS;
use reqwest::Url;
use std::time::Duration;

/// Limits applied to downloads for a single species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPolicy {
    /// Maximum kept clips per species.
    pub max_clips: usize,
    /// Consecutive rejects after which the species is abandoned.
    pub max_consecutive_rejects: usize,
    /// Longest clip that is kept (inclusive).
    pub max_duration: Duration,
    /// Extension used when a URL carries no recognised audio extension.
    pub default_extension: String,
}

impl Default for ClipPolicy {
    fn default() -> Self {
        Self::from(&EnrichConfig::default())
    }
}

impl From<&EnrichConfig> for ClipPolicy {
    fn from(config: &EnrichConfig) -> Self {
        Self {
            max_clips: config.max_clips,
            max_consecutive_rejects: config.max_consecutive_rejects,
            max_duration: Duration::from_millis(config.max_clip_duration_ms),
            default_extension: config.default_extension.trim().to_string(),
        }
    }
}

impl ClipPolicy {
    /// Whether a clip of this length is kept.
    pub fn accepts(&self, duration: Duration) -> bool {
        duration <= self.max_duration
    }

    /// Whether another download should be attempted.
    pub fn should_continue(&self, kept: usize, consecutive_rejects: usize) -> bool {
        kept < self.max_clips && consecutive_rejects < self.max_consecutive_rejects
    }

    /// File extension for a download URL.
    pub fn extension_for(&self, url: &Url) -> String {
        url.path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|last| last.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or_else(|| self.default_extension.clone())
    }
}
