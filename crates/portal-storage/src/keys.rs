//! Storage key constants.

/// Storage keys used by the portal client.
///
/// The durable token keys match the persisted layout consumed by the backend
/// portal: one independently-nullable slot per auth scheme.
pub struct StorageKeys;

impl StorageKeys {
    /// Staff bearer token (durable)
    pub const STAFF_TOKEN: &'static str = "token";

    /// Client password-auth bearer token (durable)
    pub const CLIENT_TOKEN: &'static str = "clientToken";

    /// Client magic-link opaque token (durable)
    pub const PORTAL_TOKEN: &'static str = "portalToken";

    /// Cached client profile JSON (ephemeral, paint hint only)
    pub const PORTAL_CLIENT: &'static str = "portalClient";
}
