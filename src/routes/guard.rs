//! Route guard middleware.
//!
//! DESIGN
//! ======
//! Per-request check over the page routes. API, asset, and health paths
//! bypass; unauthenticated requests for protected pages redirect to
//! `/login`; authenticated requests for `/login` or `/register` redirect to
//! the configured landing path. The decision itself is a pure function of
//! (path, authenticated) so the policy is testable without a server.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::auth::SESSION_COOKIE;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToLanding,
}

fn is_asset_request(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

/// The guard policy. Paths under `/api/` and `/assets/`, the health check,
/// and file requests always pass through.
#[must_use]
pub fn guard_decision(path: &str, authenticated: bool) -> GuardDecision {
    if path.starts_with("/api/") || path.starts_with("/assets/") || path == "/healthz" || is_asset_request(path) {
        return GuardDecision::Allow;
    }

    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };

    if authenticated && matches!(path, "/login" | "/register") {
        return GuardDecision::RedirectToLanding;
    }
    if !authenticated && !matches!(path, "/" | "/login" | "/register") {
        return GuardDecision::RedirectToLogin;
    }
    GuardDecision::Allow
}

/// Axum middleware wrapping every route, including the static-site fallback.
pub async fn guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let authenticated = jar
        .get(SESSION_COOKIE)
        .map(Cookie::value)
        .is_some_and(|token| state.sessions.validate(token).is_some());

    match guard_decision(request.uri().path(), authenticated) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
        GuardDecision::RedirectToLanding => Redirect::to(&state.config.landing_path).into_response(),
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
