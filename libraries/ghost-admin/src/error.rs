//! Error types for the Ghost Admin client.

use thiserror::Error;

/// Errors that can occur when talking to the Ghost Admin API.
#[derive(Error, Debug)]
pub enum GhostError {
    /// The admin key (or another caller-supplied value) has the wrong shape
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The admin key could not be split into id and secret
    #[error("Incorrect key format: {0}")]
    Format(String),

    /// The secret portion of the key is not valid hex
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Signing the auth token failed
    #[error("Failed to create auth token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Login was refused, or an authenticated call returned a non-2xx status
    #[error("Request rejected ({status}): {message}")]
    Authentication { status: u16, message: String },

    /// Invalid base URL or request path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline, unreachable or did not answer in time
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Failed to encode a request body
    #[error("Failed to encode request: {0}")]
    Serialization(String),

    /// Response decoded but did not have the expected shape
    #[error("Received unexpected response format: {0}")]
    UnexpectedResponse(String),
}

impl GhostError {
    /// HTTP status carried by a rejected request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GhostError::Authentication { status, .. } => Some(*status),
            GhostError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            GhostError::ServerUnreachable(e.to_string())
        } else {
            GhostError::Request(e)
        }
    }
}

/// Result type for Ghost Admin client operations.
pub type Result<T> = std::result::Result<T, GhostError>;
