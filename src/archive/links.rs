//! Download link extraction from archive search pages.

use reqwest::Url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

/// Extract download links from a search results page.
///
/// Every `<a href>` whose href contains `marker` is kept. Relative hrefs
/// are resolved against `base`; absolute ones are taken as-is. Repeated
/// URLs are collapsed, keeping the first occurrence. Hrefs that do not
/// form a valid URL are skipped.
pub fn extract_download_links(html: &str, base: &Url, marker: &str) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(marker))
    {
        match base.join(href.trim()) {
            Ok(url) => {
                if seen.insert(url.clone()) {
                    links.push(url);
                }
            }
            Err(e) => debug!("Ignoring unusable link '{href}': {e}"),
        }
    }

    links
}
