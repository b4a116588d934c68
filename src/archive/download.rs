//! Streaming file download.

use crate::error::{Error, Result};
use futures_util::StreamExt;
use reqwest::{Client, Url};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::trace;

/// Download a URL to `dest`, streaming the body to disk.
///
/// Returns the number of bytes written. Non-success HTTP statuses are
/// reported as [`Error::DownloadFailed`].
pub async fn download_file(client: &Client, url: &Url, dest: &Path) -> Result<u64> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| Error::DownloadFailed {
            url: url.to_string(),
            source: Box::new(e),
        })?;

    if !response.status().is_success() {
        return Err(Error::DownloadFailed {
            url: url.to_string(),
            source: format!("HTTP {}", response.status()).into(),
        });
    }

    let mut file = File::create(dest).await.map_err(Error::Io)?;
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::DownloadFailed {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        file.write_all(&chunk).await.map_err(Error::Io)?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await.map_err(Error::Io)?;
    trace!("Downloaded {downloaded} bytes from {url}");

    Ok(downloaded)
}
