//! Xeno-canto search page scraping.

use super::{ArchiveSource, download_file, extract_download_links};
use crate::config::ArchiveConfig;
use crate::constants::{USER_AGENT, archive::QUERY_PARAM};
use crate::error::{Error, Result};
use reqwest::{Client, Url};
use std::path::Path;
use tracing::debug;

/// Archive source backed by the xeno-canto "explore" search page.
#[derive(Debug, Clone)]
pub struct XenoCanto {
    client: Client,
    base_url: Url,
    search_path: String,
    link_marker: String,
}

impl XenoCanto {
    /// Build a client from archive settings.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| Error::InvalidUrl {
            value: config.base_url.clone(),
            source: Box::new(e),
        })?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| Error::Internal {
            message: format!("Failed to create HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url,
            search_path: config.search_path.clone(),
            link_marker: config.link_marker.clone(),
        })
    }

    /// Search page URL for a display name.
    ///
    /// The name is quoted so the archive matches it as a phrase.
    pub fn search_url(&self, name: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&self.search_path)
            .map_err(|e| Error::InvalidUrl {
                value: self.search_path.clone(),
                source: Box::new(e),
            })?;
        url.query_pairs_mut()
            .append_pair(QUERY_PARAM, &format!("\"{name}\""));
        Ok(url)
    }
}

impl ArchiveSource for XenoCanto {
    async fn search(&self, name: &str) -> Result<Vec<Url>> {
        let search_err = |e: Box<dyn std::error::Error + Send + Sync>| Error::SearchFailed {
            query: name.to_string(),
            source: e,
        };

        let url = self.search_url(name)?;
        debug!("Searching {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| search_err(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(search_err(format!("HTTP {}", response.status()).into()));
        }

        let body = response.text().await.map_err(|e| search_err(Box::new(e)))?;
        let links = extract_download_links(&body, &self.base_url, &self.link_marker);
        debug!("Found {} candidate link(s) for {name}", links.len());

        Ok(links)
    }

    async fn fetch(&self, url: &Url, dest: &Path) -> Result<()> {
        download_file(&self.client, url, dest).await.map(|_| ())
    }
}
