//! Effective runtime settings.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::http_client::{ClientError, HttpClient};
use crate::services::{HttpTitleLookup, LookupError, TitleLookup, TitleResolver};

/// Overrides the title lookup endpoint.
pub const LOOKUP_URL_ENV: &str = "PDFLINKS_LOOKUP_URL";

/// Routes lookups through a SOCKS5 proxy.
pub const SOCKS_PROXY_ENV: &str = "SOCKS_PROXY";

/// Default directory for exports.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Title lookup endpoint.
    pub lookup_url: String,
    /// User agent override; `None` uses the pdflinks default.
    pub user_agent: Option<String>,
    /// Request timeout in seconds; `None` leaves requests unbounded.
    pub request_timeout: Option<u64>,
    /// SOCKS5 proxy URL.
    pub proxy: Option<String>,
    /// Resolve titles after extraction.
    pub resolve_titles: bool,
    /// Directory for exports written under their default filenames.
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookup_url: crate::services::DEFAULT_LOOKUP_URL.to_string(),
            user_agent: None,
            request_timeout: None,
            proxy: None,
            resolve_titles: true,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Settings {
    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(LOOKUP_URL_ENV).filter(|s| !s.is_empty()) {
            tracing::debug!("Using {} from environment: {}", LOOKUP_URL_ENV, url);
            self.lookup_url = url;
        }
        if let Some(proxy) = var(SOCKS_PROXY_ENV).filter(|s| !s.is_empty()) {
            tracing::debug!("Using {} from environment: {}", SOCKS_PROXY_ENV, proxy);
            self.proxy = Some(proxy);
        }
    }

    /// Build the HTTP client these settings describe.
    pub fn http_client(&self) -> Result<HttpClient, ClientError> {
        let mut builder = HttpClient::builder();
        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(secs) = self.request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ref proxy) = self.proxy {
            builder = builder.proxy(proxy);
        }
        builder.build()
    }

    /// Title resolver backed by the configured lookup endpoint.
    pub fn title_resolver(&self) -> Result<TitleResolver, SetupError> {
        let lookup = HttpTitleLookup::new(self.http_client()?, &self.lookup_url)?;
        let lookup: Arc<dyn TitleLookup> = Arc::new(lookup);
        Ok(TitleResolver::new(lookup))
    }
}
