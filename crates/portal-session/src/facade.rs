//! The stable auth surface consumed by the rest of the application.

use crate::{resolver, AuthError, AuthResult, Identity};
use portal_api::{Credential, PortalBackend, StaffRegisterRequest};
use portal_storage::{CachedProfile, CredentialStore, TokenKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{info, warn};

/// Outcome of a client password login.
///
/// Rejections are data, not errors, so forms can render the message inline
/// without a try/catch at every call site.
#[derive(Debug, Clone)]
pub struct ClientLoginOutcome {
    pub success: bool,
    pub message: Option<String>,
}

/// Point-in-time view of the session for status surfaces and route guards.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub loading: bool,
    pub staff_authenticated: bool,
    pub portal_authenticated: bool,
    pub is_admin: bool,
    pub scheme: Option<&'static str>,
    pub subject: Option<String>,
    pub display_name: Option<String>,
}

/// Scheme-agnostic auth facade.
///
/// Constructed once at startup; [`AuthFacade::init`] runs the resolution
/// sequence before anything reads the derived flags (the `loading` flag gates
/// protected surfaces until then). Every state-mutating call writes the
/// credential store before flipping in-memory state, so a crash between the
/// two leaves stale-but-recoverable storage for the next boot's resolver.
pub struct AuthFacade<B: PortalBackend> {
    backend: B,
    store: CredentialStore,
    identity: Mutex<Option<Identity>>,
    loading: AtomicBool,
}

impl<B: PortalBackend> AuthFacade<B> {
    /// Create the facade. No identity is active until [`AuthFacade::init`].
    pub fn new(backend: B, store: CredentialStore) -> Self {
        Self {
            backend,
            store,
            identity: Mutex::new(None),
            loading: AtomicBool::new(true),
        }
    }

    /// Run startup resolution. Settles the `loading` flag whatever the result.
    pub async fn init(&self) {
        let resolved = resolver::resolve(&self.backend, &self.store).await;
        *self.identity.lock().unwrap() = resolved;
        self.loading.store(false, Ordering::SeqCst);
    }

    /// True until startup resolution has settled.
    pub fn loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// The active identity, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.identity.lock().unwrap().clone()
    }

    /// Route guard: staff identity active.
    pub fn is_staff_authenticated(&self) -> bool {
        self.identity
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(Identity::is_staff)
    }

    /// Route guard: either client scheme active.
    pub fn is_portal_authenticated(&self) -> bool {
        self.identity
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(Identity::is_portal)
    }

    /// Route guard: staff identity with the admin role.
    pub fn is_admin(&self) -> bool {
        self.identity
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(Identity::is_admin)
    }

    /// Wire credential for the active identity; anonymous when logged out.
    /// Every backend call outside this crate goes through here.
    pub fn auth_credential(&self) -> Credential {
        self.identity
            .lock()
            .unwrap()
            .as_ref()
            .map(Identity::credential)
            .unwrap_or(Credential::Anonymous)
    }

    /// Non-authoritative profile hint for pre-validation paint. Superseded by
    /// resolution; never used for authorization.
    pub fn cached_profile_hint(&self) -> Option<CachedProfile> {
        self.store.cached_profile()
    }

    /// Staff password login. Persists the bearer token, then installs the
    /// staff identity. Backend rejections propagate verbatim.
    pub async fn staff_login(&self, email: &str, password: &str) -> AuthResult<Identity> {
        let response = match self.backend.staff_login(email, password).await {
            Ok(r) => r,
            Err(e) => {
                return Err(match e.backend_message() {
                    Some(message) => AuthError::LoginRejected(message.to_string()),
                    None => AuthError::Api(e),
                })
            }
        };

        self.store.set_token(TokenKind::Staff, &response.access_token);

        let identity = Identity::Staff {
            subject: response.user.id,
            email: response.user.email,
            role: response.user.role,
            bearer_token: response.access_token,
        };
        info!(subject = %identity.subject(), "Staff login successful");
        *self.identity.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    /// Staff registration; same persistence contract as login.
    pub async fn staff_register(&self, request: &StaffRegisterRequest) -> AuthResult<Identity> {
        let response = match self.backend.staff_register(request).await {
            Ok(r) => r,
            Err(e) => {
                return Err(match e.backend_message() {
                    Some(message) => AuthError::LoginRejected(message.to_string()),
                    None => AuthError::Api(e),
                })
            }
        };

        self.store.set_token(TokenKind::Staff, &response.access_token);

        let identity = Identity::Staff {
            subject: response.user.id,
            email: response.user.email,
            role: response.user.role,
            bearer_token: response.access_token,
        };
        info!(subject = %identity.subject(), "Staff registration successful");
        *self.identity.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    /// Client password login. Failures of any kind come back as an outcome
    /// with a message; session state is untouched unless login succeeds.
    pub async fn client_login(&self, username: &str, password: &str) -> ClientLoginOutcome {
        let response = match self.backend.portal_login(username, password).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Client login request failed");
                return ClientLoginOutcome {
                    success: false,
                    message: Some(
                        e.backend_message()
                            .unwrap_or("Login request failed, please try again")
                            .to_string(),
                    ),
                };
            }
        };

        if !response.success {
            return ClientLoginOutcome {
                success: false,
                message: response.message,
            };
        }

        let (Some(token), Some(client_id)) = (response.access_token, response.client_id) else {
            warn!("Login response claimed success without token or client id");
            return ClientLoginOutcome {
                success: false,
                message: Some("Malformed login response".to_string()),
            };
        };

        self.store.set_token(TokenKind::ClientPassword, &token);
        self.store.set_cached_profile(&CachedProfile {
            client_id: client_id.clone(),
            display_name: response.display_name.clone(),
        });

        info!(client_id = %client_id, "Client password login successful");
        *self.identity.lock().unwrap() = Some(Identity::ClientPassword {
            client_id,
            display_name: response.display_name,
            bearer_token: token,
        });

        ClientLoginOutcome {
            success: true,
            message: response.message,
        }
    }

    /// Adopt a freshly-presented magic link. On failure nothing changes: an
    /// already-active identity (any scheme) survives a bad link.
    pub async fn apply_link_token(&self, token: &str) -> AuthResult<Identity> {
        let identity = resolver::apply_link_token(&self.backend, &self.store, token).await?;
        *self.identity.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    /// Clear all stored credentials and reset the identity. Always succeeds.
    pub fn logout(&self) {
        self.store.clear_all();
        *self.identity.lock().unwrap() = None;
        info!("Logged out, credential store cleared");
    }

    /// Point-in-time status snapshot.
    pub fn snapshot(&self) -> AuthSnapshot {
        let identity = self.identity.lock().unwrap();
        AuthSnapshot {
            loading: self.loading(),
            staff_authenticated: identity.as_ref().is_some_and(Identity::is_staff),
            portal_authenticated: identity.as_ref().is_some_and(Identity::is_portal),
            is_admin: identity.as_ref().is_some_and(Identity::is_admin),
            scheme: identity.as_ref().map(Identity::scheme),
            subject: identity.as_ref().map(|i| i.subject().to_string()),
            display_name: identity
                .as_ref()
                .and_then(|i| i.display_name().map(str::to_string)),
        }
    }

    /// Direct access to the credential store (status surfaces, tests).
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Direct access to the backend client (screens that list data).
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
