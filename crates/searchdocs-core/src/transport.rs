//! HTTP transport used by the resolver and the inventory fetcher.
//!
//! The pipeline only ever needs two requests, `HEAD` and `GET`, both following
//! redirects. [`Transport`] is the seam; [`HttpTransport`] is the reqwest
//! implementation used in production.

use crate::{Error, HttpConfig, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ETAG;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Response metadata (and body, for `GET`) after all redirects were followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Final URL reached after following redirects
    pub url: Url,
    /// HTTP status code of the final response
    pub status: u16,
    /// Raw `ETag` header value, quotes included, if the server sent one
    pub etag: Option<String>,
    /// Response body; always empty for `HEAD`
    pub body: Vec<u8>,
}

/// Request/response transport.
///
/// Implementations follow redirects and turn a non-success final status into
/// [`Error::HttpStatus`]. They do not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a `HEAD` request.
    async fn head(&self, url: &Url) -> Result<Response>;

    /// Issue a `GET` request and read the full body.
    async fn get(&self, url: &Url) -> Result<Response>;
}

/// reqwest-backed [`Transport`].
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout and user agent.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport from the `[http]` configuration section.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        Self::build(config.timeout(), &config.user_agent)
    }

    /// Creates a transport with a custom request timeout (primarily for tests).
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout), &HttpConfig::default().user_agent)
    }

    fn build(timeout: Option<Duration>, user_agent: &str) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::Transport)?;
        Ok(Self { client })
    }

    async fn finish(response: reqwest::Response, read_body: bool) -> Result<Response> {
        let url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let etag = response
            .headers()
            .get(ETAG)
            .map(|value| {
                value.to_str().map(str::to_string).map_err(|_| {
                    Error::Protocol(format!("ETag header from {url} is not visible ASCII"))
                })
            })
            .transpose()?;

        let body = if read_body {
            response.bytes().await?.to_vec()
        } else {
            Vec::new()
        };

        Ok(Response {
            url,
            status: status.as_u16(),
            etag,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn head(&self, url: &Url) -> Result<Response> {
        debug!(%url, "HEAD");
        let response = self.client.head(url.clone()).send().await?;
        Self::finish(response, false).await
    }

    async fn get(&self, url: &Url) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::finish(response, true).await
    }
}

// Note: Default is not implemented as HttpTransport::new() can fail.
