//! HTTP client trait abstraction.
//!
//! The poller only ever issues plain GET requests, so the trait is kept to
//! that single operation. Production code uses
//! [`ReqwestHttpClient`](crate::adapters::ReqwestHttpClient); tests use
//! [`MockHttpClient`](crate::adapters::MockHttpClient).

use async_trait::async_trait;
use bytes::Bytes;

/// A fully received HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Shorthand for a 200 response.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// Exactly HTTP 200. Other 2xx codes do not count for the stats endpoint.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Body transfer did not complete
    Incomplete(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Incomplete(msg) => write!(f, "Incomplete transfer: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// # Example
///
/// ```ignore
/// use usagemon::traits::HttpClient;
///
/// async fn fetch<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.get("http://127.0.0.1:8080/stats").await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and wait for the complete body.
    ///
    /// A non-200 status is not an error at this level; only transport
    /// failures are.
    async fn get(&self, url: &str) -> Result<Response, HttpError>;
}
