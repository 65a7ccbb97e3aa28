//! Title lookup service client.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::http_client::HttpClient;
use crate::models::TitleResult;

/// Default public title lookup endpoint.
pub const DEFAULT_LOOKUP_URL: &str =
    "https://get-title-from-url.vercel.app/api/get-title-from-url";

/// Query parameter carrying the target URL.
const URL_PARAM: &str = "url";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid lookup endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid lookup response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What the lookup service answered, short of a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupReply {
    /// Successful response; the body is trusted as-is.
    Body(TitleResult),
    /// Non-success HTTP status, body ignored.
    Status(u16),
}

/// A remote service that resolves a URL to its page title.
#[async_trait]
pub trait TitleLookup: Send + Sync {
    async fn lookup(&self, url: &str) -> Result<LookupReply, LookupError>;
}

/// Title lookup over HTTP: `GET <endpoint>?url=<target>`.
pub struct HttpTitleLookup {
    client: HttpClient,
    endpoint: Url,
}

impl HttpTitleLookup {
    pub fn new(client: HttpClient, endpoint: &str) -> Result<Self, LookupError> {
        let endpoint = Url::parse(endpoint).map_err(|source| LookupError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The request URL for a target, keeping any query the endpoint already has.
    pub fn request_url(&self, target: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair(URL_PARAM, target);
        url
    }
}

#[async_trait]
impl TitleLookup for HttpTitleLookup {
    async fn lookup(&self, url: &str) -> Result<LookupReply, LookupError> {
        let request_url = self.request_url(url);
        tracing::debug!("Looking up title: {}", request_url);

        let response = self.client.get(request_url).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Title lookup for {} returned HTTP {}", url, status);
            return Ok(LookupReply::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let result: TitleResult = serde_json::from_slice(&body)?;
        Ok(LookupReply::Body(result))
    }
}
