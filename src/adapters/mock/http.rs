//! Mock HTTP client for testing.
//!
//! Responses are scripted in call order, which lets tests reproduce the
//! poller's timing behavior (slow responses overtaken by fast ones, requests
//! that never finish) without a network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response
    Success(Response),
    /// Return an error
    Error(HttpError),
    /// Wait, then resolve the inner response
    Delayed(Duration, Box<MockResponse>),
    /// Never complete
    Pending,
}

impl MockResponse {
    /// 200 response with the given JSON body.
    pub fn json(body: &str) -> Self {
        MockResponse::Success(Response::ok(body.to_string()))
    }

    /// Response with an arbitrary status and body.
    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, body.to_string()))
    }

    /// Delay this response.
    pub fn after(self, delay: Duration) -> Self {
        MockResponse::Delayed(delay, Box::new(self))
    }
}

/// Mock HTTP client for testing.
///
/// Each call to `get` takes the next queued response. When the queue is
/// empty the default response is used; without a default the call fails.
///
/// # Example
///
/// ```ignore
/// use usagemon::adapters::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.push_response(MockResponse::json(r#"{"usages":{"cpu":1.0}}"#));
/// client.push_response(MockResponse::status(500, "boom"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Responses consumed in call order
    queue: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Response used once the queue is drained
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered call.
    pub fn push_response(&self, response: MockResponse) {
        self.queue.lock().unwrap().push_back(response);
    }

    /// Set the response used when the queue is empty.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record_request(&self, url: &str) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return Some(response);
        }
        self.default_response.lock().unwrap().clone()
    }

    async fn resolve(response: MockResponse) -> Result<Response, HttpError> {
        let mut response = response;
        loop {
            match response {
                MockResponse::Success(r) => return Ok(r),
                MockResponse::Error(err) => return Err(err),
                MockResponse::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    response = *inner;
                }
                MockResponse::Pending => return std::future::pending().await,
            }
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.record_request(url);

        match self.next_response() {
            Some(response) => Self::resolve(response).await,
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
