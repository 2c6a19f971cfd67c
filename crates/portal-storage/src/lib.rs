//! Credential persistence for the portal client.
//!
//! This crate provides two storage tiers behind a common trait:
//! - **Durable**: survives restarts; holds the three auth tokens
//!   (`FileStorage`, a JSON file under the runtime directory)
//! - **Ephemeral**: lost on process exit; holds the non-authoritative cached
//!   client profile (`MemoryStorage`)
//!
//! The high-level [`CredentialStore`] exposes typed slots over both tiers and
//! degrades silently to an always-empty store when the backing tier fails, so
//! storage trouble can never surface as an auth error.

mod file;
mod keys;
mod memory;
mod store;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use store::{CachedProfile, CredentialStore, TokenKind};
pub use traits::CredentialStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing store failed
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
