//! API error types.

use thiserror::Error;

/// Error type for backend API calls.
///
/// Session resolution deliberately treats `Status` and `Network` the same way
/// (credential presumed invalid, purge, no retry); the distinction exists for
/// logging and for surfaces that show backend messages verbatim.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend returned a non-success status.
    #[error("Backend rejected request ({status}): {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Transport-level failure (connect, timeout, TLS, malformed body, ...).
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Network(error.to_string())
    }
}

impl ApiError {
    /// Backend-provided message for user-facing surfaces, when one exists.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => Some(message),
            ApiError::Network(_) => None,
        }
    }
}

/// Result type for backend API calls.
pub type ApiResult<T> = Result<T, ApiError>;
