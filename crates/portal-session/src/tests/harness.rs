//! In-memory fake backend and store fixtures for session tests.

use portal_api::{
    ApiError, ApiResult, ClientLoginResponse, Credential, CredentialRow, LinkClient,
    LinkValidation, PortalAuthStatus, PortalBackend, RevealResponse, StaffProfile,
    StaffRegisterRequest, StaffTokenResponse, StatusCode,
};
use portal_storage::{CredentialStore, MemoryStorage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A seeded client account on the fake backend.
#[derive(Clone)]
pub struct FakeClient {
    pub client_id: String,
    pub display_name: Option<String>,
}

/// In-memory backend: validates tokens against seeded maps and records every
/// endpoint hit so tests can assert which validation steps ran.
#[derive(Default)]
pub struct FakeBackend {
    staff_tokens: Mutex<HashMap<String, StaffProfile>>,
    client_tokens: Mutex<HashMap<String, FakeClient>>,
    link_tokens: Mutex<HashMap<String, FakeClient>>,
    /// (username, password) -> (issued token, client)
    portal_accounts: Mutex<HashMap<(String, String), (String, FakeClient)>>,
    network_down: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_staff_token(&self, token: &str, subject: &str, role: &str) {
        self.staff_tokens.lock().unwrap().insert(
            token.to_string(),
            StaffProfile {
                id: subject.to_string(),
                email: format!("{}@example.com", subject),
                username: Some(subject.to_string()),
                role: Some(role.to_string()),
                referral_code: None,
                is_active: Some(true),
            },
        );
    }

    pub fn seed_client_token(&self, token: &str, client_id: &str, display_name: &str) {
        self.client_tokens.lock().unwrap().insert(
            token.to_string(),
            FakeClient {
                client_id: client_id.to_string(),
                display_name: Some(display_name.to_string()),
            },
        );
    }

    pub fn seed_link_token(&self, token: &str, client_id: &str, display_name: &str) {
        self.link_tokens.lock().unwrap().insert(
            token.to_string(),
            FakeClient {
                client_id: client_id.to_string(),
                display_name: Some(display_name.to_string()),
            },
        );
    }

    pub fn seed_portal_account(
        &self,
        username: &str,
        password: &str,
        token: &str,
        client_id: &str,
    ) {
        let client = FakeClient {
            client_id: client_id.to_string(),
            display_name: Some(username.to_string()),
        };
        self.client_tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), client.clone());
        self.portal_accounts.lock().unwrap().insert(
            (username.to_string(), password.to_string()),
            (token.to_string(), client),
        );
    }

    pub fn set_network_down(&self, down: bool) {
        self.network_down.store(down, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(endpoint);
        if self.network_down.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn unauthorized(message: &str) -> ApiError {
        ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }
}

impl PortalBackend for FakeBackend {
    async fn staff_me(&self, token: &str) -> ApiResult<StaffProfile> {
        self.record("staff_me")?;
        self.staff_tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| Self::unauthorized("Invalid token"))
    }

    async fn staff_login(&self, email: &str, password: &str) -> ApiResult<StaffTokenResponse> {
        self.record("staff_login")?;
        // One hardcoded staff account is enough for facade tests.
        if email == "admin@example.com" && password == "correct" {
            let token = "staff-token-issued".to_string();
            let profile = StaffProfile {
                id: "staff-1".to_string(),
                email: email.to_string(),
                username: Some("admin".to_string()),
                role: Some("admin".to_string()),
                referral_code: None,
                is_active: Some(true),
            };
            self.staff_tokens
                .lock()
                .unwrap()
                .insert(token.clone(), profile.clone());
            return Ok(StaffTokenResponse {
                access_token: token,
                refresh_token: None,
                user: profile,
            });
        }
        Err(Self::unauthorized("Invalid credentials"))
    }

    async fn staff_register(&self, request: &StaffRegisterRequest) -> ApiResult<StaffTokenResponse> {
        self.record("staff_register")?;
        let token = format!("staff-token-{}", request.username);
        let profile = StaffProfile {
            id: format!("staff-{}", request.username),
            email: request.email.clone(),
            username: Some(request.username.clone()),
            role: Some("user".to_string()),
            referral_code: request.referral_code.clone(),
            is_active: Some(true),
        };
        self.staff_tokens
            .lock()
            .unwrap()
            .insert(token.clone(), profile.clone());
        Ok(StaffTokenResponse {
            access_token: token,
            refresh_token: None,
            user: profile,
        })
    }

    async fn portal_auth_status(&self, token: &str) -> ApiResult<PortalAuthStatus> {
        self.record("portal_auth_status")?;
        match self.client_tokens.lock().unwrap().get(token) {
            Some(client) => Ok(PortalAuthStatus {
                client_id: Some(client.client_id.clone()),
                display_name: client.display_name.clone(),
                password_auth_enabled: Some(true),
                username: None,
            }),
            None => Err(Self::unauthorized("Invalid token")),
        }
    }

    async fn portal_login(&self, username: &str, password: &str) -> ApiResult<ClientLoginResponse> {
        self.record("portal_login")?;
        match self
            .portal_accounts
            .lock()
            .unwrap()
            .get(&(username.to_string(), password.to_string()))
        {
            Some((token, client)) => Ok(ClientLoginResponse {
                success: true,
                message: Some("Login successful".to_string()),
                access_token: Some(token.clone()),
                client_id: Some(client.client_id.clone()),
                display_name: client.display_name.clone(),
            }),
            // Rejection is a 200 with success=false, mirroring the backend.
            None => Ok(ClientLoginResponse {
                success: false,
                message: Some("Invalid username or password".to_string()),
                access_token: None,
                client_id: None,
                display_name: None,
            }),
        }
    }

    async fn validate_link(&self, token: &str) -> ApiResult<LinkValidation> {
        self.record("validate_link")?;
        match self.link_tokens.lock().unwrap().get(token) {
            Some(client) => Ok(LinkValidation {
                valid: true,
                message: None,
                client: Some(LinkClient {
                    client_id: client.client_id.clone(),
                    display_name: client.display_name.clone(),
                    status: Some("active".to_string()),
                }),
            }),
            None => Ok(LinkValidation {
                valid: false,
                message: Some("Invalid or expired portal link".to_string()),
                client: None,
            }),
        }
    }

    async fn list_credentials(&self, _credential: &Credential) -> ApiResult<Vec<CredentialRow>> {
        self.record("list_credentials")?;
        Ok(Vec::new())
    }

    async fn reveal_credential(
        &self,
        _credential: &Credential,
        _game_id: &str,
    ) -> ApiResult<RevealResponse> {
        self.record("reveal_credential")?;
        Err(ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: "No credentials for this game".to_string(),
        })
    }
}

/// Fresh in-memory credential store.
pub fn memory_store() -> CredentialStore {
    CredentialStore::new(Box::new(MemoryStorage::new()), Box::new(MemoryStorage::new()))
}
