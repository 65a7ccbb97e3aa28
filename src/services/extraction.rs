//! Document link reading.

use crate::document::{DocumentParser, ParseError, ParsedDocument};
use crate::models::LinkEntry;

/// Links read from one document, before deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Page count reported by the document.
    pub page_count: u32,
    /// One entry per link annotation, page-ascending then annotation order.
    pub links: Vec<LinkEntry>,
}

/// Read every link annotation of a document, page by page.
///
/// Pages are fetched sequentially. Any failure, whether opening the document
/// or reading a single page, aborts the whole read and nothing is returned.
pub async fn read_links<P: DocumentParser>(
    parser: &P,
    bytes: &[u8],
) -> Result<Extraction, ParseError> {
    let document = parser.open(bytes).await?;
    let page_count = document.page_count();

    let mut links = Vec::new();
    for number in 1..=page_count {
        let page = document.page(number).await?;
        let annotations = document.annotations(&page).await?;
        let before = links.len();
        links.extend(
            annotations
                .iter()
                .filter_map(|a| a.link_target())
                .map(|url| LinkEntry::new(number, url)),
        );
        tracing::debug!("Page {}: {} links", number, links.len() - before);
    }

    tracing::info!(
        "Read {} link annotations from {} pages",
        links.len(),
        page_count
    );
    Ok(Extraction { page_count, links })
}
