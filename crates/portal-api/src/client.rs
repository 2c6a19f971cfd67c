//! Reqwest-based backend client.

use crate::{
    ApiError, ApiResult, ClientLoginResponse, Credential, CredentialRow, LinkValidation,
    PortalAuthStatus, PortalBackend, RevealResponse, StaffProfile, StaffRegisterRequest,
    StaffTokenResponse,
};
use serde::de::DeserializeOwned;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Log-safe summary of a response body. Bodies can carry secrets, so only a
/// length and digest ever reach the logs.
fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Extract the user-facing message from an error body.
///
/// The backend reports rejections as `{"detail": "..."}`; some endpoints use
/// `{"message": "..."}`. Anything else degrades to a body summary.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    summarize_response_body(body)
}

/// REST client for the referral portal backend.
#[derive(Clone)]
pub struct PortalClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl PortalClient {
    /// Create a new client for the given API base URL (e.g. `https://portal.example.com/api`).
    pub fn new(api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self {
            http_client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Build a full endpoint URL.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Check status and decode, mapping non-2xx to `ApiError::Status` with the
    /// backend's own message.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, body_summary = %summarize_response_body(&body), "Backend returned error status");
            return Err(ApiError::Status {
                status,
                message: error_message(&body),
            });
        }
        Ok(response.json().await?)
    }
}

impl PortalBackend for PortalClient {
    async fn staff_me(&self, token: &str) -> ApiResult<StaffProfile> {
        let url = self.url("/auth/me");
        debug!(url = %url, "Fetching staff profile");

        let response = self.http_client.get(&url).bearer_auth(token).send().await?;
        Self::decode(response).await
    }

    async fn staff_login(&self, email: &str, password: &str) -> ApiResult<StaffTokenResponse> {
        let url = self.url("/auth/login");
        debug!(url = %url, "Staff login");

        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn staff_register(
        &self,
        request: &StaffRegisterRequest,
    ) -> ApiResult<StaffTokenResponse> {
        let url = self.url("/auth/register");
        debug!(url = %url, "Staff registration");

        let response = self.http_client.post(&url).json(request).send().await?;
        Self::decode(response).await
    }

    async fn portal_auth_status(&self, token: &str) -> ApiResult<PortalAuthStatus> {
        let url = self.url("/portal/auth/status");
        debug!(url = %url, "Checking portal auth status");

        let response = self.http_client.get(&url).bearer_auth(token).send().await?;
        Self::decode(response).await
    }

    async fn portal_login(&self, username: &str, password: &str) -> ApiResult<ClientLoginResponse> {
        let url = self.url("/portal/auth/login");
        debug!(url = %url, "Client password login");

        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn validate_link(&self, token: &str) -> ApiResult<LinkValidation> {
        // Token travels in the path; this endpoint takes no auth header.
        let url = self.url(&format!("/portal/validate/{}", token));
        debug!("Validating portal link token");

        let response = self.http_client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn list_credentials(&self, credential: &Credential) -> ApiResult<Vec<CredentialRow>> {
        let url = self.url("/portal/credentials");
        debug!(url = %url, "Listing masked game credentials");

        let request = credential.apply(self.http_client.get(&url));
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn reveal_credential(
        &self,
        credential: &Credential,
        game_id: &str,
    ) -> ApiResult<RevealResponse> {
        let url = self.url(&format!("/portal/credentials/{}/reveal", game_id));
        debug!(game_id = %game_id, "Requesting credential reveal");

        let request = credential.apply(self.http_client.post(&url));
        let response = request.send().await?;
        Self::decode(response).await
    }
}
