//! Server-side session store.
//!
//! DESIGN
//! ======
//! Sessions are random 32-byte hex tokens minted here and carried to the
//! browser in an httpOnly cookie. The store is an in-memory map with a fixed
//! TTL and an explicit invalidation call; it is deliberately decoupled from
//! cookie handling so the transport layer only ever moves opaque tokens.
//! Contents are lost on process restart.
//!
//! Internal `_at(now)` variants take an explicit clock so expiry is testable.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::services::users::User;

/// Sessions live for one week, matching the cookie max-age.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

struct SessionRecord {
    user: User,
    expires_at: Instant,
}

/// In-memory token -> user map with TTL-based expiry.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, SessionRecord>>>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(SESSION_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), ttl }
    }

    /// Mint a session for the given user, returning the token.
    pub fn create(&self, user: User) -> String {
        self.create_at(user, Instant::now())
    }

    fn create_at(&self, user: User, now: Instant) -> String {
        let token = generate_token();
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.insert(token.clone(), SessionRecord { user, expires_at: now + self.ttl });
        token
    }

    /// Look up a token, returning the user if the session is still live.
    /// Expired entries are dropped on the way out.
    #[must_use]
    pub fn validate(&self, token: &str) -> Option<User> {
        self.validate_at(token, Instant::now())
    }

    fn validate_at(&self, token: &str, now: Instant) -> Option<User> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match inner.get(token) {
            Some(record) if record.expires_at > now => Some(record.user.clone()),
            Some(_) => {
                inner.remove(token);
                None
            }
            None => None,
        }
    }

    /// Drop a session. Validation of the same token reports logged-out
    /// afterwards.
    pub fn invalidate(&self, token: &str) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.remove(token);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
