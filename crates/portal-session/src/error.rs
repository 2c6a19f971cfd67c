//! Session error types.

use portal_api::ApiError;
use thiserror::Error;

/// Error type for session operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Explicit backend rejection (bad password, locked account, ...).
    /// The message is the backend's own, surfaced verbatim to the caller.
    #[error("{0}")]
    LoginRejected(String),

    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Result type for session operations.
pub type AuthResult<T> = Result<T, AuthError>;
