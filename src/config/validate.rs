//! Configuration validation.

use crate::config::{ArchiveConfig, Config, EnrichConfig};
use crate::error::{Error, Result};
use reqwest::Url;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_enrich(&config.enrich)?;
    validate_archive(&config.archive)?;
    Ok(())
}

/// Validate clip limits.
fn validate_enrich(enrich: &EnrichConfig) -> Result<()> {
    if enrich.max_clips == 0 {
        return Err(Error::ConfigValidation {
            message: "max_clips must be at least 1".to_string(),
        });
    }

    if enrich.max_consecutive_rejects == 0 {
        return Err(Error::ConfigValidation {
            message: "max_consecutive_rejects must be at least 1".to_string(),
        });
    }

    if enrich.max_clip_duration_ms == 0 {
        return Err(Error::ConfigValidation {
            message: "max_clip_duration_ms must be at least 1".to_string(),
        });
    }

    let extension = enrich.default_extension.trim();
    if extension.is_empty() || extension.contains(['.', '/', '\\']) {
        return Err(Error::ConfigValidation {
            message: format!(
                "default_extension must be a bare extension like \"mp3\", got \"{}\"",
                enrich.default_extension
            ),
        });
    }

    Ok(())
}

/// Validate archive settings.
fn validate_archive(archive: &ArchiveConfig) -> Result<()> {
    let url = Url::parse(&archive.base_url).map_err(|e| Error::InvalidUrl {
        value: archive.base_url.clone(),
        source: Box::new(e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            message: format!("base_url must be http or https, got {}", archive.base_url),
        });
    }

    if archive.link_marker.is_empty() {
        return Err(Error::ConfigValidation {
            message: "link_marker must not be empty".to_string(),
        });
    }

    Ok(())
}
