use super::*;

// =============================================================================
// hash_password
// =============================================================================

#[test]
fn hash_password_is_hex_sha256() {
    let digest = hash_password("password123");
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash_password_is_deterministic() {
    assert_eq!(hash_password("secret"), hash_password("secret"));
    assert_ne!(hash_password("secret"), hash_password("Secret"));
}

// =============================================================================
// UserRecord
// =============================================================================

#[test]
fn record_mints_unique_ids() {
    let a = UserRecord::new("a@example.com", "pw");
    let b = UserRecord::new("b@example.com", "pw");
    assert_ne!(a.id, b.id);
}

#[test]
fn user_projection_has_no_credential_material() {
    let record = UserRecord::new("a@example.com", "pw");
    let user = record.user();
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json.get("email").and_then(|v| v.as_str()), Some("a@example.com"));
    assert!(json.get("password").is_none());
    assert!(json.get("passwordDigest").is_none());
    assert!(json.get("password_digest").is_none());
}

// =============================================================================
// MemoryUserRepo
// =============================================================================

#[tokio::test]
async fn insert_then_find_by_email() {
    let repo = MemoryUserRepo::new();
    let record = UserRecord::new("a@example.com", "pw");
    repo.insert(record.clone()).await.unwrap();
    let found = repo.find_by_email("a@example.com").await.unwrap();
    assert_eq!(found.id, record.id);
}

#[tokio::test]
async fn find_by_id_matches_insert() {
    let repo = MemoryUserRepo::new();
    let record = UserRecord::new("a@example.com", "pw");
    repo.insert(record.clone()).await.unwrap();
    let found = repo.find_by_id(&record.id).await.unwrap();
    assert_eq!(found.email, "a@example.com");
}

#[tokio::test]
async fn find_unknown_returns_none() {
    let repo = MemoryUserRepo::new();
    assert!(repo.find_by_email("nobody@example.com").await.is_none());
    assert!(repo.find_by_id("missing").await.is_none());
}

#[tokio::test]
async fn insert_duplicate_email_is_rejected() {
    let repo = MemoryUserRepo::new();
    repo.insert(UserRecord::new("a@example.com", "pw")).await.unwrap();
    let err = repo.insert(UserRecord::new("a@example.com", "other")).await.unwrap_err();
    assert!(matches!(err, UserStoreError::EmailTaken));
}

#[tokio::test]
async fn remove_deletes_by_id() {
    let repo = MemoryUserRepo::new();
    let record = UserRecord::new("a@example.com", "pw");
    repo.insert(record.clone()).await.unwrap();
    assert!(repo.remove(&record.id).await);
    assert!(repo.find_by_email("a@example.com").await.is_none());
    assert!(!repo.remove(&record.id).await);
}

#[tokio::test]
async fn seeded_repo_contains_demo_account() {
    let repo = MemoryUserRepo::seeded();
    let record = repo.find_by_email("user@example.com").await.unwrap();
    assert_eq!(record.password_digest, hash_password("password123"));
}
