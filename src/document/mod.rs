//! Document parsing capability.
//!
//! Link extraction never touches PDF structure directly. It goes through
//! [`DocumentParser`], which opens raw bytes into a [`ParsedDocument`] that
//! hands out pages and their annotations one at a time.
//!
//! The traits are `?Send`: extraction runs as a single sequential task, page
//! after page, and never crosses threads.

mod lopdf_backend;

pub use lopdf_backend::{LopdfDocument, LopdfParser};

use async_trait::async_trait;
use thiserror::Error;

/// Annotation subtype carrying hyperlinks.
pub const LINK_SUBTYPE: &str = "Link";

/// Errors raised while reading a document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to parse document: {0}")]
    Malformed(String),
    #[error("Page {page} does not exist (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("Failed to read page {page}: {reason}")]
    Page { page: u32, reason: String },
}

/// A page annotation as reported by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation subtype name, e.g. `Link` or `Text`.
    pub subtype: String,
    /// Validated absolute URL target, when there is one.
    pub url: Option<String>,
    /// Raw URL target as written in the document.
    pub unsafe_url: Option<String>,
}

impl Annotation {
    pub fn link(url: Option<&str>, unsafe_url: Option<&str>) -> Self {
        Self {
            subtype: LINK_SUBTYPE.to_string(),
            url: url.map(str::to_string),
            unsafe_url: unsafe_url.map(str::to_string),
        }
    }

    pub fn is_link(&self) -> bool {
        self.subtype == LINK_SUBTYPE
    }

    /// The URL this annotation links to, if it is a link with any usable target.
    ///
    /// The validated `url` wins over `unsafe_url`; empty strings count as absent.
    pub fn link_target(&self) -> Option<&str> {
        if !self.is_link() {
            return None;
        }
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.unsafe_url.as_deref().filter(|u| !u.is_empty()))
    }
}

/// Opens raw document bytes.
#[async_trait(?Send)]
pub trait DocumentParser {
    type Document: ParsedDocument;

    /// Parse the whole document. Fails for corrupt, unsupported or non-PDF input.
    async fn open(&self, bytes: &[u8]) -> Result<Self::Document, ParseError>;
}

/// An opened document.
#[async_trait(?Send)]
pub trait ParsedDocument {
    type Page;

    /// Number of pages reported by the document.
    fn page_count(&self) -> u32;

    /// Fetch a page by 1-based number.
    async fn page(&self, number: u32) -> Result<Self::Page, ParseError>;

    /// All annotations on a page, in document order.
    async fn annotations(&self, page: &Self::Page) -> Result<Vec<Annotation>, ParseError>;
}
