//! Shared helpers for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use birdfill::archive::ArchiveSource;
use birdfill::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use reqwest::Url;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Sample rate of synthesised clips; low to keep files small.
pub const SAMPLE_RATE: u32 = 1000;

/// Write a silent mono WAV file lasting `millis` milliseconds.
pub fn write_wav(path: &Path, millis: u32) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for _ in 0..(millis * SAMPLE_RATE / 1000) {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// What the mock archive serves for a URL.
#[derive(Debug, Clone, Copy)]
pub enum Body {
    /// A WAV clip of this many milliseconds.
    Clip(u32),
    /// Bytes that are not audio.
    Garbage,
    /// A request that fails after writing part of the body.
    Fail,
}

/// In-memory archive serving synthesised WAV clips.
#[derive(Debug, Default)]
pub struct MockArchive {
    results: HashMap<String, Vec<(Url, Body)>>,
    fetched: Mutex<Vec<Url>>,
}

impl MockArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register search results for `name`, one URL per body.
    pub fn with_species(mut self, name: &str, bodies: &[Body]) -> Self {
        let slug = name.replace(' ', "-");
        let entries = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                let url = Url::parse(&format!("https://archive.test/{slug}/{i}/download")).unwrap();
                (url, *body)
            })
            .collect();
        self.results.insert(name.to_string(), entries);
        self
    }

    /// URLs fetched so far, in order.
    pub fn fetched(&self) -> Vec<Url> {
        self.fetched.lock().unwrap().clone()
    }

    fn body_for(&self, url: &Url) -> Option<Body> {
        self.results
            .values()
            .flatten()
            .find(|(u, _)| u == url)
            .map(|(_, body)| *body)
    }
}

impl ArchiveSource for MockArchive {
    async fn search(&self, name: &str) -> Result<Vec<Url>> {
        Ok(self
            .results
            .get(name)
            .map(|entries| entries.iter().map(|(url, _)| url.clone()).collect())
            .unwrap_or_default())
    }

    async fn fetch(&self, url: &Url, dest: &Path) -> Result<()> {
        self.fetched.lock().unwrap().push(url.clone());
        match self.body_for(url) {
            Some(Body::Clip(millis)) => {
                write_wav(dest, millis);
                Ok(())
            }
            Some(Body::Garbage) => {
                std::fs::write(dest, b"<html>Too many requests</html>")?;
                Ok(())
            }
            Some(Body::Fail) | None => {
                // Connection dropped mid-body
                std::fs::write(dest, b"ID3partial")?;
                Err(Error::DownloadFailed {
                    url: url.to_string(),
                    source: "connection reset".into(),
                })
            }
        }
    }
}
