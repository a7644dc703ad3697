//! forge::errors
//!
//! Error type shared by every forge operation.

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::http::TransportError;

/// Errors from forge operations.
///
/// Every operation is a single request/response exchange, so each variant
/// describes exactly one way that exchange can fail. Nothing is retried or
/// suppressed; the caller decides what to do.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The client could not be constructed (missing or empty token).
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The forge answered with a status other than the one the call expects.
    #[error("{operation}: status code was not {expected}, got: {actual}")]
    UnexpectedStatus {
        operation: &'static str,
        expected: u16,
        actual: u16,
    },

    /// The response body did not have the expected JSON shape.
    #[error("{operation}: failed to deserialize response body: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    /// The request body could not be encoded.
    #[error("{operation}: failed to serialize the body: {message}")]
    Serialize {
        operation: &'static str,
        message: String,
    },
}

impl ForgeError {
    /// The HTTP status carried by an `UnexpectedStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ForgeError::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}
