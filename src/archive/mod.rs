//! Remote audio archives.
//!
//! The enricher only needs two capabilities from a remote source: turning
//! a species display name into candidate download URLs, and fetching one
//! of those URLs to a local file. [`ArchiveSource`] captures both so the
//! scraping backend can be swapped out or mocked.

mod download;
mod links;
mod xeno_canto;

pub use download::download_file;
pub use links::extract_download_links;
pub use xeno_canto::XenoCanto;

use crate::error::Result;
use reqwest::Url;
use std::path::Path;

/// A searchable archive of downloadable audio recordings.
pub trait ArchiveSource {
    /// Candidate download URLs for a species display name, in page order.
    fn search(&self, name: &str) -> impl Future<Output = Result<Vec<Url>>>;

    /// Download `url` and write its body to `dest`.
    fn fetch(&self, url: &Url, dest: &Path) -> impl Future<Output = Result<()>>;
}
