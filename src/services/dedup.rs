//! Link deduplication.
//!
//! Entries are compared structurally: two links are duplicates only when
//! both page and URL are equal. URLs are compared byte for byte, without any
//! case, whitespace or trailing-slash normalization.

use std::collections::HashSet;

use crate::models::LinkEntry;

/// Deduplicated links plus the distinct URLs they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    pub links: Vec<LinkEntry>,
    /// Distinct URLs, in order of first appearance.
    pub urls: Vec<String>,
}

impl Deduplicated {
    pub fn from_links(links: Vec<LinkEntry>) -> Self {
        let links = dedup_links(links);
        let urls = distinct_urls(&links);
        Self { links, urls }
    }
}

/// Drop repeated (page, url) pairs, keeping the first occurrence of each.
pub fn dedup_links(links: Vec<LinkEntry>) -> Vec<LinkEntry> {
    let mut seen = HashSet::with_capacity(links.len());
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Distinct URLs across all pages, in order of first appearance.
pub fn distinct_urls(links: &[LinkEntry]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(links.len());
    links
        .iter()
        .filter(|link| seen.insert(link.url.as_str()))
        .map(|link| link.url.clone())
        .collect()
}
