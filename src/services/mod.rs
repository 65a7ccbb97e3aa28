//! Service layer for pdflinks business logic.
//!
//! This module contains domain logic separated from UI concerns.
//! Services emit events so the CLI can render progress incrementally.

pub mod dedup;
pub mod extraction;
pub mod session;
pub mod titles;

pub use dedup::{dedup_links, distinct_urls, Deduplicated};
pub use extraction::{read_links, Extraction};
pub use session::{LinkRow, Session, SessionReport};
pub use titles::{
    resolve_title, HttpTitleLookup, LookupError, LookupReply, ResolutionHandle, TitleEvent,
    TitleLookup, TitleResolver, TitleTable, DEFAULT_LOOKUP_URL,
};
