//! Merge command-line flags over the configuration file.

use super::{EnrichArgs, ReconcileArgs};
use crate::config::{ArchiveConfig, Config, validate_config};
use crate::enrich::ClipPolicy;
use crate::error::Result;
use crate::reconcile::ReconcileOptions;
use std::path::PathBuf;

/// Everything a reconcile run needs.
#[derive(Debug, Clone)]
pub struct ReconcilePlan {
    /// Source and destination directories.
    pub options: ReconcileOptions,
    /// Headerless taxon code CSV.
    pub codes_file: PathBuf,
    /// Missing-species log file.
    pub missing_log: PathBuf,
}

/// Everything an enrich run needs.
#[derive(Debug, Clone)]
pub struct EnrichPlan {
    /// Directory holding one folder per code.
    pub destination_dir: PathBuf,
    /// `taxon_code,name` CSV.
    pub names_file: PathBuf,
    /// Clip acceptance limits.
    pub policy: ClipPolicy,
    /// Remote archive settings.
    pub archive: ArchiveConfig,
    /// Whether to draw the species progress bar.
    pub progress: bool,
}

/// Resolve reconcile settings: flags override the config file.
pub fn resolve_reconcile(args: ReconcileArgs, config: &Config) -> ReconcilePlan {
    let paths = &config.paths;
    ReconcilePlan {
        options: ReconcileOptions {
            source_dir: args.source.unwrap_or_else(|| paths.source_dir.clone()),
            destination_dir: args
                .destination
                .unwrap_or_else(|| paths.destination_dir.clone()),
        },
        codes_file: args.codes.unwrap_or_else(|| paths.codes_file.clone()),
        missing_log: args
            .missing_log
            .unwrap_or_else(|| paths.missing_log.clone()),
    }
}

/// Resolve enrich settings: flags override the config file.
///
/// The merged settings are validated again since flags can change them.
/// The progress bar is off with `--no-progress` or `-q`.
pub fn resolve_enrich(args: EnrichArgs, config: &Config, quiet: bool) -> Result<EnrichPlan> {
    let progress = !quiet && !args.no_progress;
    let mut merged = config.clone();
    if let Some(max_clips) = args.max_clips {
        merged.enrich.max_clips = max_clips;
    }
    if let Some(max_rejects) = args.max_rejects {
        merged.enrich.max_consecutive_rejects = max_rejects;
    }
    if let Some(max_duration_ms) = args.max_duration_ms {
        merged.enrich.max_clip_duration_ms = max_duration_ms;
    }
    if let Some(base_url) = args.base_url {
        merged.archive.base_url = base_url;
    }
    validate_config(&merged)?;

    Ok(EnrichPlan {
        destination_dir: args
            .destination
            .unwrap_or_else(|| merged.paths.destination_dir.clone()),
        names_file: args
            .names
            .unwrap_or_else(|| merged.paths.names_file.clone()),
        policy: ClipPolicy::from(&merged.enrich),
        archive: merged.archive,
        progress,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn enrich_args() -> EnrichArgs {
        EnrichArgs {
            destination: None,
            names: None,
            max_clips: None,
            max_rejects: None,
            max_duration_ms: None,
            base_url: None,
            no_progress: false,
        }
    }

    #[test]
    fn test_reconcile_falls_back_to_config() {
        let mut config = Config::default();
        config.paths.source_dir = PathBuf::from("/archive/old");

        let plan = resolve_reconcile(
            ReconcileArgs {
                source: None,
                destination: Some(PathBuf::from("/archive/new")),
                codes: None,
                missing_log: None,
            },
            &config,
        );

        assert_eq!(plan.options.source_dir, PathBuf::from("/archive/old"));
        assert_eq!(plan.options.destination_dir, PathBuf::from("/archive/new"));
        assert_eq!(plan.codes_file, PathBuf::from("taxon_codes.csv"));
    }

    #[test]
    fn test_enrich_flags_override_limits() {
        let mut config = Config::default();
        config.enrich.max_clips = 9;

        let args = EnrichArgs {
            max_rejects: Some(2),
            max_duration_ms: Some(5_000),
            ..enrich_args()
        };
        let plan = resolve_enrich(args, &config, false).unwrap();

        assert_eq!(plan.policy.max_clips, 9);
        assert_eq!(plan.policy.max_consecutive_rejects, 2);
        assert_eq!(plan.policy.max_duration, Duration::from_secs(5));
        assert_eq!(plan.names_file, PathBuf::from("names_and_codes.csv"));
    }

    #[test]
    fn test_enrich_rejects_bad_base_url_flag() {
        let args = EnrichArgs {
            base_url: Some("nowhere".to_string()),
            ..enrich_args()
        };
        assert!(resolve_enrich(args, &Config::default(), false).is_err());
    }

    #[test]
    fn test_enrich_progress_off_when_quiet_or_disabled() {
        let config = Config::default();

        assert!(resolve_enrich(enrich_args(), &config, false).unwrap().progress);
        assert!(!resolve_enrich(enrich_args(), &config, true).unwrap().progress);

        let args = EnrichArgs {
            no_progress: true,
            ..enrich_args()
        };
        assert!(!resolve_enrich(args, &config, false).unwrap().progress);
    }
}
