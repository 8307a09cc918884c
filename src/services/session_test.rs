use super::*;

fn demo_user() -> User {
    User { id: "1".into(), email: "user@example.com".into() }
}

// =============================================================================
// Token generation
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_is_unique() {
    assert_ne!(generate_token(), generate_token());
}

#[test]
fn bytes_to_hex_known_value() {
    assert_eq!(bytes_to_hex(&[0x00, 0xff, 0x10]), "00ff10");
}

// =============================================================================
// Store lifecycle
// =============================================================================

#[test]
fn create_then_validate_returns_user() {
    let store = SessionStore::new();
    let token = store.create(demo_user());
    let user = store.validate(&token).unwrap();
    assert_eq!(user.email, "user@example.com");
}

#[test]
fn validate_unknown_token_is_none() {
    let store = SessionStore::new();
    assert!(store.validate("deadbeef").is_none());
}

#[test]
fn invalidate_reports_logged_out_afterwards() {
    let store = SessionStore::new();
    let token = store.create(demo_user());
    store.invalidate(&token);
    assert!(store.validate(&token).is_none());
}

#[test]
fn invalidate_unknown_token_is_a_no_op() {
    let store = SessionStore::new();
    store.invalidate("deadbeef");
}

#[test]
fn sessions_are_independent() {
    let store = SessionStore::new();
    let a = store.create(demo_user());
    let b = store.create(User { id: "2".into(), email: "other@example.com".into() });
    store.invalidate(&a);
    assert!(store.validate(&a).is_none());
    assert_eq!(store.validate(&b).unwrap().id, "2");
}

// =============================================================================
// TTL expiry — clock injected via the _at variants.
// =============================================================================

#[test]
fn session_expires_after_ttl() {
    let store = SessionStore::with_ttl(Duration::from_secs(60));
    let now = Instant::now();
    let token = store.create_at(demo_user(), now);

    assert!(store.validate_at(&token, now + Duration::from_secs(59)).is_some());
    assert!(store.validate_at(&token, now + Duration::from_secs(61)).is_none());
}

#[test]
fn expired_session_stays_gone() {
    let store = SessionStore::with_ttl(Duration::from_secs(1));
    let now = Instant::now();
    let token = store.create_at(demo_user(), now);

    assert!(store.validate_at(&token, now + Duration::from_secs(2)).is_none());
    // Dropped on first expired lookup; later lookups at any clock agree.
    assert!(store.validate_at(&token, now).is_none());
}

#[test]
fn default_ttl_is_one_week() {
    assert_eq!(SESSION_TTL, Duration::from_secs(604_800));
}
