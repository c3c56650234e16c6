//! Client error definitions.

use reqwest::{Method, StatusCode};
use thiserror::Error;

use crate::http::error_body::ErrorBody;

/// Errors raised while locating the backend or talking to it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No candidate base URL answered the health probe.
    #[error("backend not found; tried: {}", .candidates.join(", "))]
    BackendUnreachable { candidates: Vec<String> },

    /// The backend answered with a non-2xx status.
    #[error("{method} {url} -> {}: {body}", .status.as_u16())]
    Http {
        method: Method,
        url: String,
        status: StatusCode,
        body: ErrorBody,
    },

    /// A 2xx response body was not the JSON shape the caller expected.
    #[error("{method} {url}: invalid JSON response: {source}")]
    Decode {
        method: Method,
        url: String,
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request never produced a response (connect, timeout, read).
    #[error("{method} {url}: {source}")]
    Transport {
        method: Method,
        url: String,
        source: reqwest::Error,
    },
}

impl ClientError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Extracted message of a rejected request.
    pub fn message(&self) -> Option<&str> {
        match self {
            ClientError::Http { body, .. } => Some(body.text()),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
