//! High-level API for the credential slots.

use crate::{CredentialStorage, StorageKeys};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The three independently-stored token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Staff bearer token
    Staff,
    /// Client password-auth bearer token
    ClientPassword,
    /// Client magic-link opaque token
    ClientLink,
}

impl TokenKind {
    /// Storage key for this token kind.
    pub fn key(&self) -> &'static str {
        match self {
            TokenKind::Staff => StorageKeys::STAFF_TOKEN,
            TokenKind::ClientPassword => StorageKeys::CLIENT_TOKEN,
            TokenKind::ClientLink => StorageKeys::PORTAL_TOKEN,
        }
    }
}

/// Denormalized client profile kept in the ephemeral tier.
///
/// Purely a paint hint to avoid a render flash before validation settles.
/// Never a trust source: nothing may derive authorization from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedProfile {
    pub client_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Typed get/set/clear over the durable and ephemeral tiers.
///
/// Storage failures are swallowed here: a broken backend behaves like an
/// always-empty store (reads yield `None`, writes are logged and dropped), so
/// resolution simply finds nothing and leaves the user unauthenticated.
pub struct CredentialStore {
    durable: Box<dyn CredentialStorage>,
    ephemeral: Box<dyn CredentialStorage>,
}

impl CredentialStore {
    /// Create a credential store over the given tiers.
    pub fn new(durable: Box<dyn CredentialStorage>, ephemeral: Box<dyn CredentialStorage>) -> Self {
        Self { durable, ephemeral }
    }

    /// Read a stored token. No validation is performed here.
    pub fn token(&self, kind: TokenKind) -> Option<String> {
        match self.durable.get(kind.key()) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = kind.key(), error = %e, "Token read failed, treating as empty");
                None
            }
        }
    }

    /// Overwrite a token slot. Last write wins.
    pub fn set_token(&self, kind: TokenKind, value: &str) {
        if let Err(e) = self.durable.set(kind.key(), value) {
            warn!(key = kind.key(), error = %e, "Token write failed, continuing unpersisted");
        }
    }

    /// Remove a single token slot. Safe when nothing is stored.
    pub fn clear_token(&self, kind: TokenKind) {
        if let Err(e) = self.durable.delete(kind.key()) {
            warn!(key = kind.key(), error = %e, "Token delete failed");
        }
    }

    /// Read the cached client profile hint.
    pub fn cached_profile(&self) -> Option<CachedProfile> {
        let raw = match self.ephemeral.get(StorageKeys::PORTAL_CLIENT) {
            Ok(value) => value?,
            Err(e) => {
                warn!(error = %e, "Cached profile read failed, treating as empty");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Cached profile is malformed, discarding");
                let _ = self.ephemeral.delete(StorageKeys::PORTAL_CLIENT);
                None
            }
        }
    }

    /// Write the cached client profile hint.
    pub fn set_cached_profile(&self, profile: &CachedProfile) {
        match serde_json::to_string(profile) {
            Ok(raw) => {
                if let Err(e) = self.ephemeral.set(StorageKeys::PORTAL_CLIENT, &raw) {
                    warn!(error = %e, "Cached profile write failed");
                }
            }
            Err(e) => warn!(error = %e, "Cached profile serialization failed"),
        }
    }

    /// Remove the cached client profile hint.
    pub fn clear_cached_profile(&self) {
        if let Err(e) = self.ephemeral.delete(StorageKeys::PORTAL_CLIENT) {
            warn!(error = %e, "Cached profile delete failed");
        }
    }

    /// Remove every token and the cached profile. Idempotent.
    pub fn clear_all(&self) {
        self.clear_token(TokenKind::Staff);
        self.clear_token(TokenKind::ClientPassword);
        self.clear_token(TokenKind::ClientLink);
        self.clear_cached_profile();
    }
}
