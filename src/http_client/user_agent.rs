//! User agent handling for HTTP requests.

pub const USER_AGENT: &str = concat!("pdflinks/", env!("CARGO_PKG_VERSION"));

/// A real browser user agent for impersonate mode.
pub const IMPERSONATE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Resolve user agent from config value.
/// - None => default pdflinks user agent
/// - "impersonate" => real browser user agent
/// - other => custom user agent string
pub fn resolve_user_agent(config: Option<&str>) -> String {
    match config {
        None => USER_AGENT.to_string(),
        Some("impersonate") => IMPERSONATE_USER_AGENT.to_string(),
        Some(custom) => custom.to_string(),
    }
}
