//! Tests for the enrichment download loop against a mock archive.

mod common;

use birdfill::audio::measure_duration;
use birdfill::enrich::{ClipPolicy, SpeciesOutcome, enrich, enrich_species};
use birdfill::Error;
use common::{Body, MockArchive};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

const SHORT: Body = Body::Clip(4_000);
const LONG: Body = Body::Clip(30_000);

fn wav_policy() -> ClipPolicy {
    ClipPolicy {
        default_extension: "wav".to_string(),
        ..ClipPolicy::default()
    }
}

fn folder_entries(folder: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<_> = fs::read_dir(folder)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}

fn file_names(folder: &Path) -> Vec<String> {
    folder_entries(folder)
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn test_keeps_short_clips_and_drops_long_ones() {
    let temp_dir = TempDir::new().unwrap();
    let archive = MockArchive::new().with_species("Common Loon", &[SHORT, LONG, SHORT]);

    let outcome = enrich_species(&archive, "Common Loon", temp_dir.path(), &wav_policy())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SpeciesOutcome::Populated {
            kept: 2,
            rejected: 1
        }
    );
    assert_eq!(
        file_names(temp_dir.path()),
        vec!["Common Loon_1.wav", "Common Loon_2.wav"]
    );
}

#[tokio::test]
async fn test_kept_clips_never_exceed_threshold() {
    let temp_dir = TempDir::new().unwrap();
    let bodies = [
        Body::Clip(15_000),
        Body::Clip(15_001),
        Body::Clip(500),
        Body::Clip(60_000),
        Body::Clip(14_999),
    ];
    let archive = MockArchive::new().with_species("Wren", &bodies);

    enrich_species(&archive, "Wren", temp_dir.path(), &wav_policy())
        .await
        .unwrap();

    let kept = folder_entries(temp_dir.path());
    assert_eq!(kept.len(), 3);
    for clip in kept {
        assert!(measure_duration(&clip).unwrap() <= Duration::from_millis(15_000));
    }
}

#[tokio::test]
async fn test_clip_cap_stops_downloads() {
    let temp_dir = TempDir::new().unwrap();
    let archive = MockArchive::new().with_species("Robin", &[SHORT; 20]);

    let outcome = enrich_species(&archive, "Robin", temp_dir.path(), &wav_policy())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SpeciesOutcome::Populated {
            kept: 15,
            rejected: 0
        }
    );
    assert_eq!(archive.fetched().len(), 15);
    assert_eq!(folder_entries(temp_dir.path()).len(), 15);
}

#[tokio::test]
async fn test_six_consecutive_rejects_stop_downloads() {
    let temp_dir = TempDir::new().unwrap();
    let archive = MockArchive::new().with_species("Loon", &[LONG; 10]);

    let outcome = enrich_species(&archive, "Loon", temp_dir.path(), &wav_policy())
        .await
        .unwrap();

    assert_eq!(outcome, SpeciesOutcome::StillEmpty { rejected: 6 });
    assert_eq!(archive.fetched().len(), 6);
    assert!(folder_entries(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_kept_clip_resets_reject_streak() {
    let temp_dir = TempDir::new().unwrap();
    let mut bodies = vec![LONG; 5];
    bodies.push(SHORT);
    bodies.extend([LONG; 8]);
    let archive = MockArchive::new().with_species("Jay", &bodies);

    let outcome = enrich_species(&archive, "Jay", temp_dir.path(), &wav_policy())
        .await
        .unwrap();

    // 5 long, 1 short, then 6 more long before giving up
    assert_eq!(
        outcome,
        SpeciesOutcome::Populated {
            kept: 1,
            rejected: 11
        }
    );
    assert_eq!(archive.fetched().len(), 12);
}

#[tokio::test]
async fn test_custom_limits_apply() {
    let temp_dir = TempDir::new().unwrap();
    let archive = MockArchive::new().with_species("Tit", &[LONG, LONG, SHORT, SHORT]);
    let policy = ClipPolicy {
        max_consecutive_rejects: 2,
        ..wav_policy()
    };

    let outcome = enrich_species(&archive, "Tit", temp_dir.path(), &policy)
        .await
        .unwrap();

    assert_eq!(outcome, SpeciesOutcome::StillEmpty { rejected: 2 });
    assert_eq!(archive.fetched().len(), 2);
}

#[tokio::test]
async fn test_undecodable_download_counts_as_reject() {
    let temp_dir = TempDir::new().unwrap();
    let archive = MockArchive::new().with_species("Gull", &[Body::Garbage, SHORT]);

    let outcome = enrich_species(&archive, "Gull", temp_dir.path(), &wav_policy())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SpeciesOutcome::Populated {
            kept: 1,
            rejected: 1
        }
    );
    assert_eq!(file_names(temp_dir.path()), vec!["Gull_1.wav"]);
}

#[tokio::test]
async fn test_no_links_leaves_folder_empty() {
    let temp_dir = TempDir::new().unwrap();
    let archive = MockArchive::new();

    let outcome = enrich_species(&archive, "Dodo", temp_dir.path(), &wav_policy())
        .await
        .unwrap();

    assert_eq!(outcome, SpeciesOutcome::NoCandidates);
    assert!(archive.fetched().is_empty());
    assert!(folder_entries(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_failed_download_propagates_without_leftovers() {
    let temp_dir = TempDir::new().unwrap();
    let archive = MockArchive::new().with_species("Crow", &[SHORT, Body::Fail, SHORT]);

    let result = enrich_species(&archive, "Crow", temp_dir.path(), &wav_policy()).await;

    assert!(matches!(result, Err(Error::DownloadFailed { .. })));
    assert_eq!(archive.fetched().len(), 2);
    // The clip kept before the failure stays; the partial download is gone
    assert_eq!(file_names(temp_dir.path()), vec!["Crow_1.wav"]);
}

#[tokio::test]
async fn test_enrich_only_touches_empty_or_missing_folders() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("filtered-birds");
    fs::create_dir_all(dest.join("amerob")).unwrap();
    fs::write(dest.join("amerob").join("existing.mp3"), b"keep").unwrap();
    fs::create_dir_all(dest.join("comloo")).unwrap();
    fs::create_dir_all(dest.join("unlisted")).unwrap();

    let names = BTreeMap::from([
        ("amerob".to_string(), "American Robin".to_string()),
        ("comloo".to_string(), "Common Loon".to_string()),
        ("norcar".to_string(), "Northern Cardinal".to_string()),
        ("dodo".to_string(), "Dodo".to_string()),
    ]);
    let archive = MockArchive::new()
        .with_species("American Robin", &[SHORT])
        .with_species("Common Loon", &[SHORT, SHORT])
        .with_species("Northern Cardinal", &[LONG, SHORT]);

    let summary = enrich(&archive, &names, &dest, &wav_policy(), false)
        .await
        .unwrap();

    assert_eq!(summary.scanned, 4);
    assert_eq!(summary.already_populated, 1);
    assert_eq!(summary.populated, 2);
    assert_eq!(summary.no_candidates, 1);
    assert_eq!(summary.clips_kept, 3);
    assert_eq!(summary.clips_rejected, 1);

    assert_eq!(file_names(&dest.join("amerob")), vec!["existing.mp3"]);
    assert_eq!(
        file_names(&dest.join("comloo")),
        vec!["Common Loon_1.wav", "Common Loon_2.wav"]
    );
    assert_eq!(
        file_names(&dest.join("norcar")),
        vec!["Northern Cardinal_1.wav"]
    );
    assert!(dest.join("dodo").is_dir());
    assert!(folder_entries(&dest.join("unlisted")).is_empty());
    assert!(
        archive
            .fetched()
            .iter()
            .all(|url| !url.path().contains("American-Robin"))
    );
}

#[tokio::test]
async fn test_enrich_rerun_skips_populated_species() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("birds");
    let names = BTreeMap::from([("comloo".to_string(), "Common Loon".to_string())]);
    let archive = MockArchive::new().with_species("Common Loon", &[SHORT]);

    enrich(&archive, &names, &dest, &wav_policy(), false)
        .await
        .unwrap();
    let summary = enrich(&archive, &names, &dest, &wav_policy(), false)
        .await
        .unwrap();

    assert_eq!(summary.already_populated, 1);
    assert_eq!(archive.fetched().len(), 1);
}

#[tokio::test]
async fn test_enrich_refetches_folder_left_with_staging_file() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("birds");
    fs::create_dir_all(dest.join("comloo")).unwrap();
    fs::write(dest.join("comloo").join("temp_Common Loon_1.wav"), b"RIFF").unwrap();
    let names = BTreeMap::from([("comloo".to_string(), "Common Loon".to_string())]);
    let archive = MockArchive::new().with_species("Common Loon", &[SHORT]);

    let summary = enrich(&archive, &names, &dest, &wav_policy(), false)
        .await
        .unwrap();

    assert_eq!(summary.populated, 1);
    assert_eq!(
        file_names(&dest.join("comloo")),
        vec!["Common Loon_1.wav"]
    );
}

#[tokio::test]
async fn test_enrich_rejects_code_outside_destination() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("birds");
    let names = BTreeMap::from([("../escaped".to_string(), "Common Loon".to_string())]);
    let archive = MockArchive::new().with_species("Common Loon", &[SHORT]);

    let result = enrich(&archive, &names, &dest, &wav_policy(), false).await;

    assert!(matches!(result, Err(Error::InvalidTaxonCode { .. })));
    assert!(!temp_dir.path().join("escaped").exists());
    assert!(archive.fetched().is_empty());
}
