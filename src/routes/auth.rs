//! Auth routes — login, register, logout, current-user, session cookies.
//!
//! The backend decides whether credentials are valid; this module owns form
//! validation, session minting, and cookie transport. All three session
//! cookies are httpOnly, path `/`, SameSite=Lax, 7-day max age, and `Secure`
//! when the configuration says so.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::Duration;

use crate::services::auth::{AuthError, AuthSuccess};
use crate::services::upstream::UpstreamError;
use crate::services::users::User;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "panda_session";
pub const JWT_COOKIE: &str = "panda_jwt_token";
pub const EMAIL_COOKIE: &str = "panda_user_email";

const COOKIE_MAX_AGE: Duration = Duration::days(7);
const MIN_REGISTER_PASSWORD_LEN: usize = 6;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user resolved from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = app_state
            .sessions
            .validate(token)
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// FORM VALIDATION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Field-level validation messages, camelCase to match the form fields.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub password: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub confirm_password: Vec<String>,
}

impl FieldErrors {
    fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty() && self.confirm_password.is_empty()
    }
}

/// Normalize and sanity-check an email address.
#[must_use]
pub(crate) fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

pub(crate) fn validate_login(req: &LoginRequest) -> Result<(String, String), FieldErrors> {
    let mut errors = FieldErrors::default();
    let email = normalize_email(&req.email);
    if email.is_none() {
        errors.email.push("Invalid email address.".into());
    }
    if req.password.is_empty() {
        errors.password.push("Password cannot be empty.".into());
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok((email.unwrap_or_default(), req.password.clone()))
}

pub(crate) fn validate_register(req: &RegisterRequest) -> Result<(String, String), FieldErrors> {
    let mut errors = FieldErrors::default();
    let email = normalize_email(&req.email);
    if email.is_none() {
        errors.email.push("Invalid email address.".into());
    }
    if req.password.len() < MIN_REGISTER_PASSWORD_LEN {
        errors.password.push("Password must be at least 6 characters.".into());
    }
    if req.password != req.confirm_password {
        errors.confirm_password.push("Passwords don't match".into());
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok((email.unwrap_or_default(), req.password.clone()))
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(COOKIE_MAX_AGE)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Mint a session and build the cookie jar for a successful login/register.
fn establish_session(state: &AppState, jar: CookieJar, success: &AuthSuccess) -> CookieJar {
    let secure = state.config.cookie_secure;
    let token = state.sessions.create(success.user.clone());
    let mut jar = jar.add(session_cookie(SESSION_COOKIE, token, secure));
    if let Some(jwt) = &success.jwt_token {
        jar = jar
            .add(session_cookie(JWT_COOKIE, jwt.clone(), secure))
            .add(session_cookie(EMAIL_COOKIE, success.user.email.clone(), secure));
    }
    jar
}

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::Upstream(UpstreamError::Status { status, .. }) => StatusCode::from_u16(*status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        AuthError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

fn validation_failure(errors: &FieldErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Invalid form data.", "errors": errors })),
    )
        .into_response()
}

fn auth_failure(err: &AuthError) -> Response {
    (auth_error_to_status(err), Json(json!({ "message": err.to_string() }))).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
}

/// `POST /api/auth/login` — validate credentials, mint a session, set cookies.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(req): Json<LoginRequest>) -> Response {
    let (email, password) = match validate_login(&req) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure(&errors),
    };

    match state.auth.login(&email, &password).await {
        Ok(success) => {
            let jar = establish_session(&state, jar, &success);
            (jar, Json(AuthResponse { user: success.user })).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            auth_failure(&err)
        }
    }
}

/// `POST /api/auth/register` — create an account, then behave like login.
pub async fn register(State(state): State<AppState>, jar: CookieJar, Json(req): Json<RegisterRequest>) -> Response {
    let (email, password) = match validate_register(&req) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure(&errors),
    };

    match state.auth.register(&email, &password).await {
        Ok(success) => {
            let jar = establish_session(&state, jar, &success);
            (jar, Json(AuthResponse { user: success.user })).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration failed");
            auth_failure(&err)
        }
    }
}

/// `POST /api/auth/logout` — invalidate the session, expire all cookies.
/// No delegated token revocation is attempted.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.invalidate(cookie.value());
    }

    let secure = state.config.cookie_secure;
    let jar = CookieJar::new()
        .add(expired_cookie(SESSION_COOKIE, secure))
        .add(expired_cookie(JWT_COOKIE, secure))
        .add(expired_cookie(EMAIL_COOKIE, secure));
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me` — return the current user.
pub async fn me(auth: AuthSession) -> Json<User> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
