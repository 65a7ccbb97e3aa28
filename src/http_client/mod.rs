//! HTTP client used for title lookups.
//!
//! Redirects are followed transparently. Requests go through a SOCKS proxy
//! when one is configured (or `SOCKS_PROXY` is set).

mod user_agent;

pub use user_agent::{resolve_user_agent, IMPERSONATE_USER_AGENT, USER_AGENT};

use std::time::Duration;

use reqwest::{redirect, Client, Proxy, Response};
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed per request.
pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid SOCKS proxy URL '{0}'. Must start with socks5:// or socks5h://")]
    InvalidProxyScheme(String),
    #[error("Invalid SOCKS proxy URL '{url}': {source}")]
    InvalidProxy { url: String, source: reqwest::Error },
    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Thin wrapper around a configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    proxied: bool,
}

/// Builder for constructing `HttpClient` with optional configuration.
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
    proxy: Option<String>,
}

impl HttpClientBuilder {
    /// Set the user agent string.
    /// - `"impersonate"`: Use a real browser user agent
    /// - Any other string: Use as-is
    /// - Not called: Use default pdflinks user agent
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    /// Set a whole-request timeout. Without it, only the transport defaults apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route requests through a SOCKS5 proxy.
    pub fn proxy(mut self, proxy_url: &str) -> Self {
        self.proxy = Some(proxy_url.to_string());
        self
    }

    /// Build the `HttpClient`.
    ///
    /// # Errors
    /// Returns an error if the proxy URL is not a SOCKS5 URL or the client
    /// cannot be initialized.
    pub fn build(self) -> Result<HttpClient, ClientError> {
        let user_agent = resolve_user_agent(self.user_agent.as_deref());

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let proxied = self.proxy.is_some();
        if let Some(proxy_url) = self.proxy {
            if !proxy_url.starts_with("socks5://") && !proxy_url.starts_with("socks5h://") {
                return Err(ClientError::InvalidProxyScheme(proxy_url));
            }
            let proxy = Proxy::all(proxy_url.as_str()).map_err(|source| ClientError::InvalidProxy {
                url: proxy_url.clone(),
                source,
            })?;
            tracing::debug!("HTTP client routed through proxy {}", proxy_url);
            builder = builder.proxy(proxy);
        }

        Ok(HttpClient {
            client: builder.build()?,
            proxied,
        })
    }
}

impl HttpClient {
    /// Create a builder for configuring an `HttpClient`.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Check if this client is using a proxy.
    pub fn is_proxied(&self) -> bool {
        self.proxied
    }

    /// Issue a GET request, following redirects.
    pub async fn get(&self, url: Url) -> Result<Response, reqwest::Error> {
        self.client.get(url).send().await
    }
}
