//! Reveal error types.

use portal_api::ApiError;
use thiserror::Error;

/// Error type for reveal operations.
#[derive(Error, Debug)]
pub enum RevealError {
    /// The item has no revealable secret (unassigned or suspended account).
    /// These rows never start a fetch.
    #[error("Credential cannot be revealed: {0}")]
    NotRevealable(String),

    /// The backend refused or the fetch failed; nothing was cached.
    #[error("Reveal failed: {0}")]
    Api(#[from] ApiError),
}

/// Result type for reveal operations.
pub type RevealResult<T> = Result<T, RevealError>;
