//! Authentication backends.
//!
//! ARCHITECTURE
//! ============
//! One `AuthBackend` trait, two implementations: `MockAuth` validates against
//! an injected `UserRepository`, `DelegatedAuth` forwards credentials to the
//! external PANDA backend. `AuthClient` dispatches between them based on
//! configuration, so callers never know which variant is live.
//!
//! Neither variant touches cookies; the route layer owns transport. A
//! delegated success carries the backend's JWT so the route layer can store
//! it alongside the session cookie.

use crate::config::{AppConfig, BackendMode};
use crate::services::upstream::{self, UpstreamError};
use crate::services::users::{User, UserRecord, UserRepository, hash_password};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Outcome of a successful login or register. Registration produces the
/// same shape as login in both variants.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub user: User,
    /// JWT issued by the delegated backend; `None` in mock mode.
    pub jwt_token: Option<String>,
}

/// Credential validation strategy.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError>;
    async fn register(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError>;
}

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete auth client selected by `AUTH_MODE`.
pub enum AuthClient {
    Mock(MockAuth),
    Delegated(DelegatedAuth),
}

impl AuthClient {
    /// Build the configured variant. Mock mode starts from the seeded
    /// in-memory store.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        match config.auth_mode {
            BackendMode::Mock => {
                Self::Mock(MockAuth::new(Box::new(crate::services::users::MemoryUserRepo::seeded())))
            }
            BackendMode::Delegated => Self::Delegated(DelegatedAuth::new(config.panda_api_url.clone())),
        }
    }
}

#[async_trait::async_trait]
impl AuthBackend for AuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        match self {
            Self::Mock(inner) => inner.login(email, password).await,
            Self::Delegated(inner) => inner.login(email, password).await,
        }
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        match self {
            Self::Mock(inner) => inner.register(email, password).await,
            Self::Delegated(inner) => inner.register(email, password).await,
        }
    }
}

// =============================================================================
// MOCK VARIANT
// =============================================================================

/// Credential check against an injected user repository.
pub struct MockAuth {
    users: Box<dyn UserRepository>,
}

impl MockAuth {
    #[must_use]
    pub fn new(users: Box<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait::async_trait]
impl AuthBackend for MockAuth {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        let record = self
            .users
            .find_by_email(email)
            .await
            .ok_or(AuthError::InvalidCredentials)?;
        if record.password_digest != hash_password(password) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(AuthSuccess { user: record.user(), jwt_token: None })
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        let record = UserRecord::new(email, password);
        let user = record.user();
        self.users
            .insert(record)
            .await
            .map_err(|_| AuthError::EmailTaken)?;
        Ok(AuthSuccess { user, jwt_token: None })
    }
}

// =============================================================================
// DELEGATED VARIANT
// =============================================================================

#[derive(Debug, serde::Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct DelegatedAuthResponse {
    token: String,
    user: DelegatedUser,
}

#[derive(Debug, serde::Deserialize)]
struct DelegatedUser {
    id: String,
    email: String,
}

/// Forwards credentials to the PANDA backend. No token revocation is
/// attempted on logout; the backend owns the account lifecycle.
pub struct DelegatedAuth {
    http: reqwest::Client,
    base_url: String,
}

impl DelegatedAuth {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { http: reqwest::Client::new(), base_url }
    }

    async fn post_credentials(&self, path: &str, email: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        let resp = self
            .http
            .post(upstream::join_url(&self.base_url, path))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| upstream::from_send_error(&self.base_url, &e))?;

        if !resp.status().is_success() {
            return Err(upstream::from_response(resp).await.into());
        }

        let body: DelegatedAuthResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        Ok(AuthSuccess {
            user: User { id: body.user.id, email: body.user.email },
            jwt_token: Some(body.token),
        })
    }
}

#[async_trait::async_trait]
impl AuthBackend for DelegatedAuth {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        self.post_credentials("/api/users/login", email, password).await
    }

    /// Register, then chain into login for the session-bearing response.
    async fn register(&self, email: &str, password: &str) -> Result<AuthSuccess, AuthError> {
        self.post_credentials("/api/users/register", email, password)
            .await?;
        self.login(email, password).await
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
