//! Data models for pdflinks.

mod link;
mod title;

pub use link::LinkEntry;
pub use title::{TitleResult, TitleStatus, LOCAL_FAILURE_STATUS};
