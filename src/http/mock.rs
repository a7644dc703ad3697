//! http::mock
//!
//! Mock HTTP client for deterministic testing.
//!
//! # Design
//!
//! Responses are queued up front and handed out in order, one per
//! [`HttpClient::send`] call. Every request is recorded so tests can assert
//! on the URL, method, headers and body that went out. When the queue runs
//! dry the mock answers with a connect error, which makes an unexpected
//! extra call fail loudly instead of hanging.
//!
//! # Example
//!
//! ```
//! use versync::http::mock::MockHttpClient;
//! use versync::http::{HttpClient, HttpRequest, Method};
//!
//! # tokio_test::block_on(async {
//! let http = MockHttpClient::new().respond_json(200, r#"{"value":"1.2.3"}"#);
//!
//! let resp = http
//!     .send(HttpRequest::new(Method::Get, "https://api.github.com/x"))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(resp.status, 200);
//! assert_eq!(http.requests().len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Mock HTTP client.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    inner: Arc<Mutex<MockHttpInner>>,
}

#[derive(Debug, Default)]
struct MockHttpInner {
    /// Queued results, handed out front to back.
    responses: VecDeque<Result<HttpResponse, TransportError>>,
    /// Every request received, in order.
    requests: Vec<HttpRequest>,
}

impl MockHttpClient {
    /// Create a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and raw body.
    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a response carrying a JSON (or deliberately malformed) body.
    pub fn respond_json(self, status: u16, body: &str) -> Self {
        self.respond(status, body.as_bytes().to_vec())
    }

    /// Queue a response with an empty body.
    pub fn respond_empty(self, status: u16) -> Self {
        self.respond(status, Vec::new())
    }

    /// Queue a transport failure.
    pub fn fail_with(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, result: Result<HttpResponse, TransportError>) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(result);
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.responses.len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        let url = request.url.clone();
        inner.requests.push(request);
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connect {
                    url,
                    message: "no mock response queued".to_string(),
                })
            })
    }
}
