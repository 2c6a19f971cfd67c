//! Backend trait seam.

use crate::{
    ApiResult, ClientLoginResponse, Credential, CredentialRow, LinkValidation, PortalAuthStatus,
    RevealResponse, StaffProfile, StaffRegisterRequest, StaffTokenResponse,
};

/// The backend surface consumed by session resolution and secret reveal.
///
/// [`crate::PortalClient`] is the production implementation; tests substitute
/// an in-memory fake so the resolution and reveal state machines can be
/// exercised without a network.
pub trait PortalBackend {
    /// `GET /auth/me` with a staff bearer token.
    fn staff_me(&self, token: &str) -> impl std::future::Future<Output = ApiResult<StaffProfile>>;

    /// `POST /auth/login`.
    fn staff_login(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = ApiResult<StaffTokenResponse>>;

    /// `POST /auth/register`.
    fn staff_register(
        &self,
        request: &StaffRegisterRequest,
    ) -> impl std::future::Future<Output = ApiResult<StaffTokenResponse>>;

    /// `GET /portal/auth/status` with a client-password bearer token.
    fn portal_auth_status(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = ApiResult<PortalAuthStatus>>;

    /// `POST /portal/auth/login`.
    fn portal_login(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = ApiResult<ClientLoginResponse>>;

    /// `GET /portal/validate/{token}` — token travels in the path, no auth header.
    fn validate_link(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = ApiResult<LinkValidation>>;

    /// `GET /portal/credentials` with the active client credential.
    fn list_credentials(
        &self,
        credential: &Credential,
    ) -> impl std::future::Future<Output = ApiResult<Vec<CredentialRow>>>;

    /// `POST /portal/credentials/{game_id}/reveal` with the active client credential.
    fn reveal_credential(
        &self,
        credential: &Credential,
        game_id: &str,
    ) -> impl std::future::Future<Output = ApiResult<RevealResponse>>;
}
