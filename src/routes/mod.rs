//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API routes and the static site under a single
//! Axum router. The search UI, login/register forms, and dashboard shell are
//! plain static pages served from `website/`; the route guard wraps
//! everything, including the static fallback.

pub mod auth;
pub mod guard;
pub mod search;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Resolve the path to the static website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"))
}

/// Full application router: API routes + static site + guard middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let website = ServeDir::new(website_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/api/search", get(search::search))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state.clone())
        .fallback_service(website)
        .layer(middleware::from_fn_with_state(state, guard::guard))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
