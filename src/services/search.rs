//! Service directory search backends.
//!
//! ARCHITECTURE
//! ============
//! One `SearchBackend` trait, two implementations: `MockSearch` filters a
//! static catalog, `DelegatedSearch` forwards the query to the PANDA backend
//! and remaps its snake_case response shape onto the client-facing one.
//! `SearchClient` dispatches between them based on configuration.
//!
//! No retries, no caching, no pagination. Empty queries never reach a
//! backend; the route layer short-circuits them.

use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, BackendMode};
use crate::services::upstream::{self, UpstreamError};

/// A directory entry describing an externally reachable application/API.
/// Serialized camelCase (`publicUrl`) for the search UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub public_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Query strategy for the service directory.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Return all services matching the (non-empty) free-text query.
    async fn search(&self, query: &str) -> Result<Vec<Service>, SearchError>;
}

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete search client selected by `SEARCH_MODE`.
pub enum SearchClient {
    Mock(MockSearch),
    Delegated(DelegatedSearch),
}

impl SearchClient {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        match config.search_mode {
            BackendMode::Mock => Self::Mock(MockSearch::new()),
            BackendMode::Delegated => {
                Self::Delegated(DelegatedSearch::new(config.panda_api_url.clone()))
            }
        }
    }
}

#[async_trait::async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<Service>, SearchError> {
        match self {
            Self::Mock(inner) => inner.search(query).await,
            Self::Delegated(inner) => inner.search(query).await,
        }
    }
}

// =============================================================================
// MOCK VARIANT
// =============================================================================

/// Static catalog filtered by case-insensitive substring match against
/// name, description, type, and domain. Each record matches at most once.
pub struct MockSearch {
    catalog: Vec<Service>,
}

impl MockSearch {
    #[must_use]
    pub fn new() -> Self {
        Self { catalog: demo_catalog() }
    }

    #[must_use]
    pub fn with_catalog(catalog: Vec<Service>) -> Self {
        Self { catalog }
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SearchBackend for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<Service>, SearchError> {
        let needle = query.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
                    || s.kind.to_lowercase().contains(&needle)
                    || s.domain.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

fn demo_catalog() -> Vec<Service> {
    vec![
        Service {
            id: "service1".into(),
            name: "My Cool App".into(),
            description: "A very cool application for doing cool things.".into(),
            domain: "cool-app.panda.local".into(),
            kind: "WebApp".into(),
            public_url: "https://cool-app.panda.local".into(),
        },
        Service {
            id: "service2".into(),
            name: "Data API".into(),
            description: "Provides critical data for other services.".into(),
            domain: "data-api.panda.local".into(),
            kind: "API".into(),
            public_url: "https://data-api.panda.local".into(),
        },
        Service {
            id: "service3".into(),
            name: "Legacy System".into(),
            description: "Old system, needs to be migrated.".into(),
            domain: "legacy.internal".into(),
            kind: "Internal".into(),
            public_url: "http://legacy.internal".into(),
        },
        Service {
            id: "service4".into(),
            name: "Blog Platform".into(),
            description: "Personal blog site.".into(),
            domain: "myblog.panda.dev".into(),
            kind: "Website".into(),
            public_url: "https://myblog.panda.dev".into(),
        },
    ]
}

// =============================================================================
// DELEGATED VARIANT
// =============================================================================

/// Upstream item shape. Extra fields (`local_url`, `created_at`) are dropped
/// during remapping.
#[derive(Debug, Deserialize)]
struct UpstreamService {
    id: String,
    name: String,
    description: String,
    domain: String,
    #[serde(rename = "type")]
    kind: String,
    public_url: String,
}

impl From<UpstreamService> for Service {
    fn from(item: UpstreamService) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            domain: item.domain,
            kind: item.kind,
            public_url: item.public_url,
        }
    }
}

/// Forwards the query to `{base}/api/search?q=` and remaps the response.
pub struct DelegatedSearch {
    http: reqwest::Client,
    base_url: String,
}

impl DelegatedSearch {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { http: reqwest::Client::new(), base_url }
    }
}

#[async_trait::async_trait]
impl SearchBackend for DelegatedSearch {
    async fn search(&self, query: &str) -> Result<Vec<Service>, SearchError> {
        let resp = self
            .http
            .get(upstream::join_url(&self.base_url, "/api/search"))
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| upstream::from_send_error(&self.base_url, &e))?;

        if !resp.status().is_success() {
            return Err(upstream::from_response(resp).await.into());
        }

        let items: Vec<UpstreamService> = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        Ok(items.into_iter().map(Service::from).collect())
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
