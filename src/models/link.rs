//! Extracted link occurrences.

use serde::{Deserialize, Serialize};

/// One hyperlink occurrence on a page of a document.
///
/// XLSX export takes its column names from the serialized field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkEntry {
    /// 1-based page number.
    pub page: u32,
    /// Link target, exactly as it appears in the document.
    pub url: String,
}

impl LinkEntry {
    pub fn new(page: u32, url: impl Into<String>) -> Self {
        Self {
            page,
            url: url.into(),
        }
    }
}
