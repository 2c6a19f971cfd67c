//! Wire credential dispatch.

use reqwest::RequestBuilder;

/// Header carrying the opaque magic-link token.
pub const PORTAL_TOKEN_HEADER: &str = "X-Portal-Token";

/// The wire credential for the currently active identity.
///
/// Every authenticated call goes through [`Credential::apply`], so a scheme
/// change never requires touching individual call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// `Authorization: Bearer <token>` (staff and client password schemes).
    Bearer(String),
    /// `X-Portal-Token: <token>` (magic-link scheme).
    LinkToken(String),
    /// No auth material attached.
    Anonymous,
}

impl Credential {
    /// Attach this credential's headers to a request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credential::Bearer(token) => request.bearer_auth(token),
            Credential::LinkToken(token) => request.header(PORTAL_TOKEN_HEADER, token),
            Credential::Anonymous => request,
        }
    }

    /// True when no auth material is attached.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credential::Anonymous)
    }
}
