//! http
//!
//! Thin HTTP transport used by every forge call.
//!
//! # Design
//!
//! The [`HttpClient`] trait performs exactly one request and hands back the
//! status code together with the fully read body. It never interprets the
//! status code; that is the caller's job.
//!
//! Implementations read the body to completion inside [`HttpClient::send`],
//! so the underlying connection is released before the call returns, on
//! success and on every error path alike.
//!
//! # Modules
//!
//! - `client`: [`ReqwestClient`], the production implementation
//! - [`mock`]: [`mock::MockHttpClient`] for deterministic testing

mod client;
pub mod mock;

pub use client::{ReqwestClient, USER_AGENT_VALUE};

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors raised when a request could not complete at the transport level.
///
/// A response with an unexpected status code is NOT a transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete before its timeout elapsed.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// DNS resolution or TCP/TLS connection failed.
    #[error("failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    /// A header name or value could not be encoded.
    #[error("invalid header '{name}'")]
    InvalidHeader { name: String },

    /// Any other failure while sending the request or reading the body.
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The HTTP client itself could not be built.
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

/// HTTP methods used against the forge API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Patch => write!(f, "PATCH"),
        }
    }
}

/// A single outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub timeout: Duration,
    pub body: Option<Vec<u8>>,
    pub headers: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Create a request with no body, no headers and the default timeout.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            body: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Look up a header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A completed response: status code plus the body, already read in full.
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
}

/// Performs one HTTP request per call.
///
/// Implementations must be `Send + Sync` so a single client can be shared
/// behind an `Arc` by every collaborator.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send the request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] only when the exchange itself fails
    /// (DNS, connection refused, timeout, unreadable body). Any status code,
    /// including 4xx and 5xx, is returned as `Ok`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
