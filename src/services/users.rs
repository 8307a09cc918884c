//! User accounts and the user repository.
//!
//! DESIGN
//! ======
//! The mock auth backend does not own a global user table; it is handed a
//! `UserRepository`. The in-memory implementation below doubles as the
//! default runtime store and the test double. Passwords are digested with
//! SHA-256 before storage and comparison and never serialized.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// User object as seen by clients. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// Stored account row: the wire-facing user plus its password digest.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_digest: String,
}

impl UserRecord {
    /// Create a record for a new account, minting a fresh id.
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_owned(),
            password_digest: hash_password(password),
        }
    }

    /// The client-facing projection of this record.
    #[must_use]
    pub fn user(&self) -> User {
        User { id: self.id.clone(), email: self.email.clone() }
    }
}

/// Hex SHA-256 digest of a password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("an account with this email already exists")]
    EmailTaken,
}

/// Account storage used by the mock auth backend. Swappable between the
/// in-memory implementation and a real persistence client.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;
    async fn find_by_id(&self, id: &str) -> Option<UserRecord>;
    async fn insert(&self, record: UserRecord) -> Result<(), UserStoreError>;
    async fn remove(&self, id: &str) -> bool;
}

/// In-memory account store keyed by email. Contents are lost on restart.
pub struct MemoryUserRepo {
    inner: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryUserRepo {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Mutex::new(HashMap::new()) }
    }

    /// A store pre-populated with the fixed demo account
    /// (`user@example.com` / `password123`).
    #[must_use]
    pub fn seeded() -> Self {
        let repo = Self::new();
        let record = UserRecord::new("user@example.com", "password123");
        repo.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(record.email.clone(), record);
        repo
    }
}

impl Default for MemoryUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.get(email).cloned()
    }

    async fn find_by_id(&self, id: &str) -> Option<UserRecord> {
        let inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.values().find(|r| r.id == id).cloned()
    }

    async fn insert(&self, record: UserRecord) -> Result<(), UserStoreError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if inner.contains_key(&record.email) {
            return Err(UserStoreError::EmailTaken);
        }
        inner.insert(record.email.clone(), record);
        Ok(())
    }

    async fn remove(&self, id: &str) -> bool {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(email) = inner
            .values()
            .find(|r| r.id == id)
            .map(|r| r.email.clone())
        else {
            return false;
        };
        inner.remove(&email).is_some()
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
