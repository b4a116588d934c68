//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "birdfill";

/// User agent sent with archive requests.
pub const USER_AGENT: &str = concat!("birdfill/", env!("CARGO_PKG_VERSION"));

/// Default file and directory locations, relative to the working directory.
pub mod paths {
    /// Existing species folders to reconcile from.
    pub const SOURCE_DIR: &str = "old-birds";
    /// Reconciled species folders.
    pub const DESTINATION_DIR: &str = "filtered-birds";
    /// Headerless CSV with one taxon code per row.
    pub const CODES_FILE: &str = "taxon_codes.csv";
    /// Headered CSV mapping `taxon_code` to `name`.
    pub const NAMES_FILE: &str = "names_and_codes.csv";
    /// Append-only log of codes with no source folder.
    pub const MISSING_LOG: &str = "missing_birds.log";
}

/// Clip acceptance limits for enrichment.
pub mod clips {
    /// Maximum number of kept clips per species.
    pub const MAX_CLIPS: usize = 15;

    /// Consecutive rejected downloads after which a species is abandoned.
    pub const MAX_CONSECUTIVE_REJECTS: usize = 6;

    /// Longest clip duration that is kept, in milliseconds.
    pub const MAX_DURATION_MS: u64 = 15_000;

    /// Extension used when a download URL carries none.
    pub const DEFAULT_EXTENSION: &str = "mp3";

    /// Prefix of in-flight download files inside a species folder.
    pub const STAGING_PREFIX: &str = "temp_";

    /// Audio extensions recognised in download URLs.
    pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "m4a", "aac", "ogg"];
}

/// Remote archive defaults.
pub mod archive {
    /// Archive base URL.
    pub const BASE_URL: &str = "https://www.xeno-canto.org";

    /// Search page path, relative to the base URL.
    pub const SEARCH_PATH: &str = "explore";

    /// Query parameter carrying the search term.
    pub const QUERY_PARAM: &str = "query";

    /// Substring that marks an anchor href as a download link.
    pub const LINK_MARKER: &str = "download";
}

/// Text written to the missing-species log.
pub mod missing_log {
    /// Timestamp format for log lines.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

    /// Message preceding the species code.
    pub const MESSAGE: &str = "Bird species not found";
}
