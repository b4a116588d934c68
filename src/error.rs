//! Error types for birdfill.

/// Result type alias for birdfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for birdfill.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to read a reference CSV file.
    #[error("failed to read reference file '{path}'")]
    ReferenceRead {
        /// Path to the reference file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Taxon code that cannot be used as a single folder name.
    #[error("invalid taxon code '{code}': must be a single folder name")]
    InvalidTaxonCode {
        /// The offending code.
        code: String,
    },

    /// Source directory for reconciliation does not exist.
    #[error("source directory does not exist: {path}")]
    SourceDirNotFound {
        /// Path to the missing source directory.
        path: std::path::PathBuf,
    },

    /// Failed to copy a species folder.
    #[error("failed to copy '{from}' to '{to}'")]
    CopyFailed {
        /// Path being copied.
        from: std::path::PathBuf,
        /// Copy target.
        to: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a species or output directory.
    #[error("failed to create directory '{path}'")]
    DirCreateFailed {
        /// Path to the directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the missing-species log.
    #[error("failed to write missing-species log '{path}'")]
    MissingLogWrite {
        /// Path to the log file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid URL in configuration or archive response.
    #[error("invalid URL '{value}'")]
    InvalidUrl {
        /// The offending value.
        value: String,
        /// Underlying parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Archive search request failed.
    #[error("archive search for '{query}' failed")]
    SearchFailed {
        /// Display name that was searched.
        query: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Download failed.
    #[error("failed to download from '{url}'")]
    DownloadFailed {
        /// URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// Duration of an audio file could not be determined.
    #[error("could not determine duration of '{path}'")]
    UnknownDuration {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// Failed to move an accepted clip into place.
    #[error("failed to store clip '{from}' as '{to}'")]
    ClipStore {
        /// Staging path.
        from: std::path::PathBuf,
        /// Final clip path.
        to: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
