// onboard-client/src/error.rs
// Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, timeout or undecodable transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// Backend answered 404
    #[error("API error: 404 - {body}")]
    NotFound { body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Caller-supplied value cannot be sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Draft rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another submit on the same session has not finished
    #[error("A submission is already in progress")]
    SubmissionInFlight,
}

impl ClientError {
    /// Map a non-success status and its body
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            404 => Self::NotFound { body },
            _ => Self::Api { status, body },
        }
    }

    /// HTTP status reported by the backend, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Client result type
pub type ClientResult<T> = Result<T, ClientError>;
