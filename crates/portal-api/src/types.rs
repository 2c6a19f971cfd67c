//! Request/response DTOs for the backend contract.

use serde::{Deserialize, Serialize};

/// Sentinel shown in masked rows when no account has been assigned yet.
pub const CREDENTIAL_NOT_SET: &str = "[Not Set]";

/// Sentinel shown in masked rows when the underlying game is suspended.
pub const CREDENTIAL_SUSPENDED: &str = "[Game Suspended]";

/// Staff user profile from `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffProfile {
    /// User ID (the auth subject)
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Role string; `"admin"` unlocks the admin surfaces
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl StaffProfile {
    /// Role check used by the admin route guard.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Response from `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: StaffProfile,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct StaffRegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

/// Response from `GET /portal/auth/status`.
///
/// `client_id` present means the bearer credential resolved to a client.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalAuthStatus {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub password_auth_enabled: Option<bool>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Response from `POST /portal/auth/login`.
///
/// Rejections come back as `success: false` with a message, not as an HTTP
/// error, so forms can render them inline.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientLoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Client payload inside a successful link validation.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkClient {
    pub client_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response from `GET /portal/validate/{token}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkValidation {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub client: Option<LinkClient>,
}

/// Masked credential row from `GET /portal/credentials`.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialRow {
    pub id: String,
    pub client_id: String,
    pub game_id: String,
    #[serde(default)]
    pub game_name: Option<String>,
    /// Masked username, or one of the sentinels
    pub game_user_id: String,
    /// Masked password, or one of the sentinels
    pub game_password: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub assigned_at: Option<String>,
    #[serde(default)]
    pub last_accessed_at: Option<String>,
}

impl CredentialRow {
    /// True when the row can be revealed at all.
    ///
    /// Unassigned and suspended accounts are marked by sentinels in the masked
    /// display value rather than a separate flag; those rows never start a
    /// reveal fetch.
    pub fn is_revealable(&self) -> bool {
        self.game_user_id != CREDENTIAL_NOT_SET && self.game_user_id != CREDENTIAL_SUSPENDED
    }
}

/// Response from `POST /portal/credentials/{game_id}/reveal`.
#[derive(Debug, Clone, Deserialize)]
pub struct RevealResponse {
    pub game_user_id: String,
    pub game_password: String,
    pub expires_in_seconds: u64,
}
