//! Resolution priority, fallback, and purge invariants.

use super::harness::{memory_store, FakeBackend};
use crate::{resolver, Identity};
use portal_storage::TokenKind;

#[tokio::test]
async fn staff_wins_over_valid_client_tokens() {
    let backend = FakeBackend::new();
    backend.seed_staff_token("staff-tok", "staff-1", "admin");
    backend.seed_client_token("client-tok", "c1", "Alice");
    backend.seed_link_token("link-tok", "c1", "Alice");

    let store = memory_store();
    store.set_token(TokenKind::Staff, "staff-tok");
    store.set_token(TokenKind::ClientPassword, "client-tok");
    store.set_token(TokenKind::ClientLink, "link-tok");

    let identity = resolver::resolve(&backend, &store).await;
    assert!(matches!(identity, Some(Identity::Staff { .. })));

    // Only the staff endpoint was consulted.
    assert_eq!(backend.calls(), vec!["staff_me"]);
}

#[tokio::test]
async fn invalid_staff_falls_back_to_client_password_and_purges() {
    let backend = FakeBackend::new();
    backend.seed_client_token("client-tok", "c1", "Alice");

    let store = memory_store();
    store.set_token(TokenKind::Staff, "stale-staff-tok");
    store.set_token(TokenKind::ClientPassword, "client-tok");

    let identity = resolver::resolve(&backend, &store).await;
    match identity {
        Some(Identity::ClientPassword { client_id, .. }) => assert_eq!(client_id, "c1"),
        other => panic!("expected client password identity, got {:?}", other),
    }

    // The failing staff token was purged; the winning client token was not.
    assert_eq!(store.token(TokenKind::Staff), None);
    assert_eq!(
        store.token(TokenKind::ClientPassword),
        Some("client-tok".to_string())
    );
}

#[tokio::test]
async fn client_password_success_skips_link_validation() {
    let backend = FakeBackend::new();
    backend.seed_client_token("client-tok", "c1", "Alice");
    backend.seed_link_token("link-tok", "c2", "Bob");

    let store = memory_store();
    store.set_token(TokenKind::ClientPassword, "client-tok");
    store.set_token(TokenKind::ClientLink, "link-tok");

    let identity = resolver::resolve(&backend, &store).await;
    assert!(matches!(identity, Some(Identity::ClientPassword { .. })));

    // Link validation never ran, and the unused link token is untouched.
    assert!(!backend.calls().contains(&"validate_link"));
    assert_eq!(
        store.token(TokenKind::ClientLink),
        Some("link-tok".to_string())
    );
}

#[tokio::test]
async fn client_password_success_caches_profile_hint() {
    let backend = FakeBackend::new();
    backend.seed_client_token("client-tok", "c1", "Alice");

    let store = memory_store();
    store.set_token(TokenKind::ClientPassword, "client-tok");

    resolver::resolve(&backend, &store).await;

    let profile = store.cached_profile().expect("profile hint cached");
    assert_eq!(profile.client_id, "c1");
    assert_eq!(profile.display_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn link_token_resolves_when_no_other_scheme_stored() {
    let backend = FakeBackend::new();
    backend.seed_link_token("link-tok", "c3", "Carol");

    let store = memory_store();
    store.set_token(TokenKind::ClientLink, "link-tok");

    let identity = resolver::resolve(&backend, &store).await;
    match identity {
        Some(Identity::ClientLink { client_id, link_token, .. }) => {
            assert_eq!(client_id, "c3");
            assert_eq!(link_token, "link-tok");
        }
        other => panic!("expected client link identity, got {:?}", other),
    }
    assert!(store.cached_profile().is_some());
}

#[tokio::test]
async fn invalid_link_purges_token_and_profile() {
    let backend = FakeBackend::new();

    let store = memory_store();
    store.set_token(TokenKind::ClientLink, "expired-link");
    store.set_cached_profile(&portal_storage::CachedProfile {
        client_id: "stale".to_string(),
        display_name: None,
    });

    let identity = resolver::resolve(&backend, &store).await;
    assert!(identity.is_none());
    assert_eq!(store.token(TokenKind::ClientLink), None);
    assert_eq!(store.cached_profile(), None);
}

#[tokio::test]
async fn network_error_purges_like_invalid_credential() {
    let backend = FakeBackend::new();
    backend.seed_staff_token("staff-tok", "staff-1", "admin");
    backend.set_network_down(true);

    let store = memory_store();
    store.set_token(TokenKind::Staff, "staff-tok");

    let identity = resolver::resolve(&backend, &store).await;
    assert!(identity.is_none());
    // Deliberately identical to the invalid-token path: purged, no retry.
    assert_eq!(store.token(TokenKind::Staff), None);
}

#[tokio::test]
async fn empty_store_resolves_to_none_without_network_calls() {
    let backend = FakeBackend::new();
    let store = memory_store();

    let identity = resolver::resolve(&backend, &store).await;
    assert!(identity.is_none());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn resolution_is_strictly_sequential() {
    let backend = FakeBackend::new();
    backend.seed_link_token("link-tok", "c1", "Alice");

    let store = memory_store();
    store.set_token(TokenKind::Staff, "bad-staff");
    store.set_token(TokenKind::ClientPassword, "bad-client");
    store.set_token(TokenKind::ClientLink, "link-tok");

    let identity = resolver::resolve(&backend, &store).await;
    assert!(matches!(identity, Some(Identity::ClientLink { .. })));

    // Each step settled before the next began, in priority order.
    assert_eq!(
        backend.calls(),
        vec!["staff_me", "portal_auth_status", "validate_link"]
    );
    assert_eq!(store.token(TokenKind::Staff), None);
    assert_eq!(store.token(TokenKind::ClientPassword), None);
}

#[tokio::test]
async fn apply_link_token_failure_mutates_nothing() {
    let backend = FakeBackend::new();
    let store = memory_store();
    store.set_token(TokenKind::ClientPassword, "client-tok");

    let result = resolver::apply_link_token(&backend, &store, "bogus-link").await;
    assert!(result.is_err());

    // No slot was written or cleared.
    assert_eq!(store.token(TokenKind::ClientLink), None);
    assert_eq!(
        store.token(TokenKind::ClientPassword),
        Some("client-tok".to_string())
    );
}

#[tokio::test]
async fn apply_link_token_success_persists_and_caches() {
    let backend = FakeBackend::new();
    backend.seed_link_token("fresh-link", "c9", "Dora");
    let store = memory_store();

    let identity = resolver::apply_link_token(&backend, &store, "fresh-link")
        .await
        .expect("valid link adopted");

    assert!(matches!(identity, Identity::ClientLink { .. }));
    assert_eq!(
        store.token(TokenKind::ClientLink),
        Some("fresh-link".to_string())
    );
    assert_eq!(store.cached_profile().unwrap().client_id, "c9");
}
