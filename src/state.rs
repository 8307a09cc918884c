//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The auth and search backends are held as trait objects so the mock and
//! delegated variants are interchangeable at runtime and swappable in tests.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth::AuthBackend;
use crate::services::search::SearchBackend;
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn AuthBackend>,
    pub search: Arc<dyn SearchBackend>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, auth: Arc<dyn AuthBackend>, search: Arc<dyn SearchBackend>) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            search,
            sessions: SessionStore::new(),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
