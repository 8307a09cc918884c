//! Search proxy route.
//!
//! `GET /api/search?q=` — trimmed-empty queries return `[]` before any
//! backend dispatch, in both mock and delegated modes. Failures become a
//! JSON `{message}` body carrying the upstream status where one exists.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

use crate::services::search::{SearchError, Service};
use crate::services::upstream::UpstreamError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub(crate) fn search_error_to_status(err: &SearchError) -> StatusCode {
    match err {
        SearchError::Upstream(UpstreamError::Status { status, .. }) => StatusCode::from_u16(*status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        SearchError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

/// `GET /api/search` — return services matching the free-text query.
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchQuery>) -> Response {
    let query = params.q.as_deref().unwrap_or_default().trim().to_owned();
    if query.is_empty() {
        return Json(Vec::<Service>::new()).into_response();
    }

    match state.search.search(&query).await {
        Ok(services) => Json(services).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "search backend failed");
            (search_error_to_status(&err), Json(json!({ "message": err.to_string() }))).into_response()
        }
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
