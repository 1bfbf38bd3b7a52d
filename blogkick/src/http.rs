//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors raised by the transport itself.
///
/// A non-success HTTP status is *not* an error at this layer: callers such as
/// the purge client need the status and body of failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The underlying client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
    /// Request could not be sent or no response was received
    #[error("Request failed: {0}")]
    Request(String),
    /// Response body could not be read
    #[error("Failed to read response: {0}")]
    Body(String),
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// Lets the purge client and the publish coordinator run against a mock in
/// tests and against [`ReqwestClient`] in production.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP POST request with an empty body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request, query string included
    ///
    /// # Returns
    ///
    /// The response status and body, or a transport error.
    fn post(&self, url: &str) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;

    /// Performs an async HTTP GET request that bypasses intermediate caches.
    fn get_uncached(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("blogkick/", env!("CARGO_PKG_VERSION"));

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    async fn finish(
        url: &str,
        sent: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<HttpResponse, HttpError> {
        let response = match sent {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(HttpError::Request(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(HttpResponse::new(status, bytes.to_vec()))
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(HttpError::Body(e.to_string()))
            }
        }
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn post(&self, url: &str) -> Result<HttpResponse, HttpError> {
        trace!(url = url, "HTTP POST request starting");
        let sent = self.client.post(url).send().await;
        Self::finish(url, sent).await
    }

    async fn get_uncached(&self, url: &str) -> Result<HttpResponse, HttpError> {
        trace!(url = url, "HTTP GET (uncached) request starting");
        let sent = self
            .client
            .get(url)
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send()
            .await;
        Self::finish(url, sent).await
    }
}
