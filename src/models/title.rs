//! Title lookup results.

use serde::{Deserialize, Serialize};

/// Status code recorded when a lookup fails before any HTTP status is known.
pub const LOCAL_FAILURE_STATUS: u16 = 500;

/// Outcome of resolving one URL's page title.
///
/// Mirrors the lookup service's response body, so successful responses
/// deserialize into it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleResult {
    /// HTTP-like status code (500 for local failures).
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TitleResult {
    /// A bare status with no title or error, as recorded for non-success responses.
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            title: None,
            error: None,
        }
    }

    /// A local failure (transport error, undecodable body).
    pub fn local_failure(message: impl Into<String>) -> Self {
        Self {
            status: LOCAL_FAILURE_STATUS,
            title: None,
            error: Some(message.into()),
        }
    }

    pub fn status(&self) -> TitleStatus {
        TitleStatus::classify(Some(self))
    }

    /// Text shown in a table cell: the title, else the error, else the status code.
    pub fn display_text(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| self.status.to_string())
    }
}

/// Display classification of a link's title resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStatus {
    Pending,
    Success,
    Failure,
}

impl TitleStatus {
    /// Classify a (possibly missing) result.
    ///
    /// A missing result or a zero status is still pending; 200 is success;
    /// anything else is a failure.
    pub fn classify(result: Option<&TitleResult>) -> Self {
        match result.map(|r| r.status) {
            None | Some(0) => Self::Pending,
            Some(200) => Self::Success,
            Some(_) => Self::Failure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}
