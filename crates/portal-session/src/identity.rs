//! The resolved authenticated principal.

use portal_api::Credential;

/// The resolved "who is logged in" result. At most one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Durable bearer-token auth (admin/staff).
    Staff {
        subject: String,
        email: String,
        role: Option<String>,
        bearer_token: String,
    },
    /// Durable bearer-token auth (client, username/password).
    ClientPassword {
        client_id: String,
        display_name: Option<String>,
        bearer_token: String,
    },
    /// Durable custom-header auth (client, magic link).
    ClientLink {
        client_id: String,
        display_name: Option<String>,
        link_token: String,
    },
}

impl Identity {
    /// The wire credential for this identity. Single dispatch point: call
    /// sites never re-derive header shapes per scheme.
    pub fn credential(&self) -> Credential {
        match self {
            Identity::Staff { bearer_token, .. }
            | Identity::ClientPassword { bearer_token, .. } => {
                Credential::Bearer(bearer_token.clone())
            }
            Identity::ClientLink { link_token, .. } => Credential::LinkToken(link_token.clone()),
        }
    }

    /// True for the staff variant.
    pub fn is_staff(&self) -> bool {
        matches!(self, Identity::Staff { .. })
    }

    /// True for either client variant.
    pub fn is_portal(&self) -> bool {
        matches!(
            self,
            Identity::ClientPassword { .. } | Identity::ClientLink { .. }
        )
    }

    /// Role check on the staff variant.
    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Staff { role, .. } if role.as_deref() == Some("admin"))
    }

    /// Subject for logging and status display (user id or client id).
    pub fn subject(&self) -> &str {
        match self {
            Identity::Staff { subject, .. } => subject,
            Identity::ClientPassword { client_id, .. } | Identity::ClientLink { client_id, .. } => {
                client_id
            }
        }
    }

    /// Display name when the scheme carries one.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Identity::Staff { email, .. } => Some(email),
            Identity::ClientPassword { display_name, .. }
            | Identity::ClientLink { display_name, .. } => display_name.as_deref(),
        }
    }

    /// Short scheme tag for logs and status output.
    pub fn scheme(&self) -> &'static str {
        match self {
            Identity::Staff { .. } => "staff",
            Identity::ClientPassword { .. } => "client_password",
            Identity::ClientLink { .. } => "client_link",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_dispatch() {
        let staff = Identity::Staff {
            subject: "u1".to_string(),
            email: "a@b.c".to_string(),
            role: Some("admin".to_string()),
            bearer_token: "st".to_string(),
        };
        assert_eq!(staff.credential(), Credential::Bearer("st".to_string()));
        assert!(staff.is_staff());
        assert!(staff.is_admin());
        assert!(!staff.is_portal());

        let link = Identity::ClientLink {
            client_id: "c1".to_string(),
            display_name: None,
            link_token: "lt".to_string(),
        };
        assert_eq!(link.credential(), Credential::LinkToken("lt".to_string()));
        assert!(link.is_portal());
        assert!(!link.is_admin());
    }

    #[test]
    fn test_non_admin_staff() {
        let staff = Identity::Staff {
            subject: "u1".to_string(),
            email: "a@b.c".to_string(),
            role: Some("user".to_string()),
            bearer_token: "st".to_string(),
        };
        assert!(staff.is_staff());
        assert!(!staff.is_admin());
    }
}
