//! Extraction session state.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use super::dedup::Deduplicated;
use super::extraction::read_links;
use super::titles::{ResolutionHandle, TitleEvent, TitleResolver, TitleTable};
use crate::document::{DocumentParser, ParseError};
use crate::models::{LinkEntry, TitleResult, TitleStatus};

/// State of the most recent extraction.
///
/// Each call to [`Session::extract`] replaces everything, including the
/// title table. Lookups still running from an earlier run keep writing to
/// the table they were given, which the session no longer holds.
#[derive(Debug, Default)]
pub struct Session {
    links: Vec<LinkEntry>,
    urls: Vec<String>,
    titles: Arc<TitleTable>,
    page_count: Option<u32>,
}

/// One display row: a link and whatever is known about its title so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRow {
    pub page: u32,
    pub url: String,
    pub status: TitleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleResult>,
}

impl LinkRow {
    /// Cell text: title, error or bare status; empty while pending.
    pub fn title_text(&self) -> String {
        self.title
            .as_ref()
            .map(TitleResult::display_text)
            .unwrap_or_default()
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub page_count: u32,
    pub links: Vec<LinkRow>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and deduplicate the links of a document, replacing the session.
    ///
    /// Returns the distinct URLs to resolve. On failure the session is left
    /// empty, so no data from this or any earlier run survives.
    pub async fn extract<P: DocumentParser>(
        &mut self,
        parser: &P,
        bytes: &[u8],
    ) -> Result<&[String], ParseError> {
        *self = Self::default();

        let extraction = read_links(parser, bytes).await?;
        let deduplicated = Deduplicated::from_links(extraction.links);

        tracing::info!(
            "Extracted {} links ({} distinct URLs) from {} pages",
            deduplicated.links.len(),
            deduplicated.urls.len(),
            extraction.page_count
        );

        self.links = deduplicated.links;
        self.urls = deduplicated.urls;
        self.page_count = Some(extraction.page_count);
        Ok(&self.urls)
    }

    /// Start resolving titles for this session's distinct URLs.
    pub fn resolve_titles(
        &self,
        resolver: &TitleResolver,
        events: Option<mpsc::Sender<TitleEvent>>,
    ) -> ResolutionHandle {
        resolver.spawn(self.urls.clone(), self.titles.clone(), events)
    }

    pub fn links(&self) -> &[LinkEntry] {
        &self.links
    }

    /// Distinct URLs, in order of first appearance.
    pub fn distinct_urls(&self) -> &[String] {
        &self.urls
    }

    pub fn titles(&self) -> &Arc<TitleTable> {
        &self.titles
    }

    /// Page count of the last successfully read document.
    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// `Extracted X links from Y pages.`, once a document has been read.
    pub fn summary(&self) -> Option<String> {
        self.page_count.map(|pages| {
            format!(
                "Extracted {} links from {} pages.",
                self.links.len(),
                pages
            )
        })
    }

    /// Rows in link order, with title state as of now.
    pub fn rows(&self) -> Vec<LinkRow> {
        self.links
            .iter()
            .map(|link| {
                let title = self.titles.get(&link.url);
                LinkRow {
                    page: link.page,
                    url: link.url.clone(),
                    status: TitleStatus::classify(title.as_ref()),
                    title,
                }
            })
            .collect()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            page_count: self.page_count.unwrap_or(0),
            links: self.rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Annotation;
    use crate::services::extraction::tests::FakeParser;
    use crate::services::titles::tests::FakeLookup;
    use crate::services::titles::LookupReply;

    fn link(url: &str) -> Annotation {
        Annotation::link(Some(url), None)
    }

    fn two_page_parser() -> FakeParser {
        FakeParser::new(vec![
            vec![link("A"), link("B"), link("A")],
            vec![link("B")],
        ])
    }

    #[tokio::test]
    async fn extract_then_resolve_scenario() {
        let parser = two_page_parser();
        let lookup = Arc::new(
            FakeLookup::default()
                .reply(
                    "A",
                    0,
                    LookupReply::Body(TitleResult {
                        status: 200,
                        title: Some("Example".to_string()),
                        error: None,
                    }),
                )
                .fail("B", 0),
        );
        let resolver = TitleResolver::new(lookup.clone());

        let mut session = Session::new();
        let urls = session.extract(&parser, b"%PDF-1.7").await.unwrap().to_vec();
        assert_eq!(urls, vec!["A", "B"]);
        assert_eq!(
            session.links(),
            &[
                LinkEntry::new(1, "A"),
                LinkEntry::new(1, "B"),
                LinkEntry::new(2, "B"),
            ]
        );
        assert_eq!(
            session.summary().as_deref(),
            Some("Extracted 3 links from 2 pages.")
        );

        // Before resolution every row is pending.
        assert!(session
            .rows()
            .iter()
            .all(|row| row.status == TitleStatus::Pending && row.title_text().is_empty()));

        session.resolve_titles(&resolver, None).wait().await;

        let mut calls = lookup.calls();
        calls.sort();
        assert_eq!(calls, vec!["A", "B"]);

        let rows = session.rows();
        assert_eq!(rows[0].status, TitleStatus::Success);
        assert_eq!(rows[0].title_text(), "Example");
        assert_eq!(rows[1].status, TitleStatus::Failure);
        assert_eq!(rows[1].title.as_ref().unwrap().status, 500);
        assert!(rows[1].title_text().starts_with("Invalid lookup response"));
        // Both rows for B share one result.
        assert_eq!(rows[1].title, rows[2].title);
    }

    #[tokio::test]
    async fn failed_extraction_clears_previous_run() {
        let parser = two_page_parser();
        let mut session = Session::new();
        session.extract(&parser, b"%PDF-1.7").await.unwrap();
        session
            .titles()
            .insert("A".into(), TitleResult::from_status(200));

        let err = session.extract(&parser, b"not a pdf").await;
        assert!(err.is_err());
        assert!(!session.has_links());
        assert!(session.distinct_urls().is_empty());
        assert!(session.titles().is_empty());
        assert_eq!(session.page_count(), None);
        assert_eq!(session.summary(), None);
    }

    #[tokio::test]
    async fn new_extraction_installs_fresh_title_table() {
        let parser = two_page_parser();
        let mut session = Session::new();
        session.extract(&parser, b"%PDF-1.7").await.unwrap();
        let old_table = session.titles().clone();

        session.extract(&parser, b"%PDF-1.7").await.unwrap();
        // A stale write to the old table is invisible to the new run.
        old_table.insert("A".into(), TitleResult::from_status(200));
        assert!(!Arc::ptr_eq(&old_table, session.titles()));
        assert_eq!(session.titles().status("A"), TitleStatus::Pending);
    }

    #[tokio::test]
    async fn document_without_links() {
        let parser = FakeParser::new(vec![vec![], vec![], vec![], vec![]]);
        let mut session = Session::new();
        let urls = session.extract(&parser, b"%PDF-1.7").await.unwrap();
        assert!(urls.is_empty());
        assert_eq!(session.page_count(), Some(4));
        assert_eq!(
            session.summary().as_deref(),
            Some("Extracted 0 links from 4 pages.")
        );
        assert_eq!(session.report().links.len(), 0);
    }
}
