//! Startup session resolution.
//!
//! Picks at most one identity from the credential store, validating each
//! candidate against the backend in strict priority order:
//!
//! 1. staff bearer token → `GET /auth/me`
//! 2. client password bearer token → `GET /portal/auth/status`
//! 3. magic-link token → `GET /portal/validate/{token}`
//!
//! Each step only runs if every earlier step failed or had nothing stored, and
//! a token is purged exactly when its own validation fails. Validation failure
//! and network failure are treated identically: the credential is presumed
//! invalid and cleared, with no retry. A transient blip at boot therefore
//! degrades to "logged out" rather than an indefinite spinner; the user
//! re-authenticates.

use crate::{AuthError, AuthResult, Identity};
use portal_api::PortalBackend;
use portal_storage::{CachedProfile, CredentialStore, TokenKind};
use tracing::{debug, info, warn};

/// Resolve the active identity from stored credentials.
///
/// Runs once at startup, before the application is considered ready. Returns
/// `None` when no stored credential validates; storage trouble surfaces the
/// same way (the store reads as empty).
pub async fn resolve<B: PortalBackend>(backend: &B, store: &CredentialStore) -> Option<Identity> {
    // Step 1: staff bearer token.
    if let Some(token) = store.token(TokenKind::Staff) {
        match backend.staff_me(&token).await {
            Ok(profile) => {
                info!(subject = %profile.id, "Resolved staff identity");
                return Some(Identity::Staff {
                    subject: profile.id,
                    email: profile.email,
                    role: profile.role,
                    bearer_token: token,
                });
            }
            Err(e) => {
                warn!(error = %e, "Stored staff token failed validation, purging");
                store.clear_token(TokenKind::Staff);
            }
        }
    } else {
        debug!("No staff token stored");
    }

    // Step 2: client password bearer token. A success here stops resolution:
    // an explicitly-chosen password login must not be overridden by a leftover
    // link token from an older session.
    if let Some(token) = store.token(TokenKind::ClientPassword) {
        match backend.portal_auth_status(&token).await {
            Ok(status) if status.client_id.is_some() => {
                let client_id = status.client_id.unwrap_or_default();
                info!(client_id = %client_id, "Resolved client password identity");
                store.set_cached_profile(&CachedProfile {
                    client_id: client_id.clone(),
                    display_name: status.display_name.clone(),
                });
                return Some(Identity::ClientPassword {
                    client_id,
                    display_name: status.display_name,
                    bearer_token: token,
                });
            }
            Ok(_) => {
                warn!("Auth status response carried no client id, purging client token");
                store.clear_token(TokenKind::ClientPassword);
            }
            Err(e) => {
                warn!(error = %e, "Stored client token failed validation, purging");
                store.clear_token(TokenKind::ClientPassword);
            }
        }
    } else {
        debug!("No client password token stored");
    }

    // Step 3: magic-link token.
    if let Some(token) = store.token(TokenKind::ClientLink) {
        match backend.validate_link(&token).await {
            Ok(validation) if validation.valid => {
                if let Some(client) = validation.client {
                    info!(client_id = %client.client_id, "Resolved client link identity");
                    store.set_cached_profile(&CachedProfile {
                        client_id: client.client_id.clone(),
                        display_name: client.display_name.clone(),
                    });
                    return Some(Identity::ClientLink {
                        client_id: client.client_id,
                        display_name: client.display_name,
                        link_token: token,
                    });
                }
                warn!("Link validation succeeded without a client payload, purging");
                store.clear_token(TokenKind::ClientLink);
                store.clear_cached_profile();
            }
            Ok(_) => {
                info!("Stored portal link is no longer valid, purging");
                store.clear_token(TokenKind::ClientLink);
                store.clear_cached_profile();
            }
            Err(e) => {
                warn!(error = %e, "Link validation failed, purging");
                store.clear_token(TokenKind::ClientLink);
                store.clear_cached_profile();
            }
        }
    } else {
        debug!("No portal link token stored");
    }

    info!("No stored credential resolved, starting unauthenticated");
    None
}

/// Validate and adopt a freshly-presented magic-link token.
///
/// On success the token is persisted, the profile hint cached, and the new
/// identity returned. On failure nothing is mutated: a user who clicks a bad
/// link while logged in keeps their existing session, and one who was logged
/// out stays logged out.
pub async fn apply_link_token<B: PortalBackend>(
    backend: &B,
    store: &CredentialStore,
    token: &str,
) -> AuthResult<Identity> {
    let validation = backend.validate_link(token).await?;

    if !validation.valid {
        info!("Presented portal link is invalid, leaving session untouched");
        return Err(AuthError::LoginRejected(
            validation
                .message
                .unwrap_or_else(|| "Invalid or expired portal link".to_string()),
        ));
    }

    let client = validation.client.ok_or_else(|| {
        AuthError::LoginRejected("Invalid or expired portal link".to_string())
    })?;

    store.set_token(TokenKind::ClientLink, token);
    store.set_cached_profile(&CachedProfile {
        client_id: client.client_id.clone(),
        display_name: client.display_name.clone(),
    });

    info!(client_id = %client.client_id, "Adopted new portal link identity");
    Ok(Identity::ClientLink {
        client_id: client.client_id,
        display_name: client.display_name,
        link_token: token.to_string(),
    })
}
