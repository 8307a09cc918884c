//! Shared plumbing for talking to the delegated PANDA backend.
//!
//! Both delegated adapters (auth and search) surface upstream failures the
//! same way: non-2xx responses keep their status and carry the message the
//! backend put in its body, and connection failures get a user-facing hint
//! naming the configured base URL.

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Non-2xx reply from the PANDA backend.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The backend could not be reached at all.
    #[error("could not connect to the PANDA API at {base_url}; ensure the PANDA server is running")]
    Connect { base_url: String },
    /// Any other transport-level failure.
    #[error("request to the PANDA API failed: {0}")]
    Transport(String),
}

/// Classify a send-level `reqwest` failure.
pub(crate) fn from_send_error(base_url: &str, err: &reqwest::Error) -> UpstreamError {
    if err.is_connect() {
        UpstreamError::Connect { base_url: base_url.to_owned() }
    } else {
        UpstreamError::Transport(err.to_string())
    }
}

/// Consume a non-2xx response into an `UpstreamError::Status`.
pub(crate) async fn from_response(resp: reqwest::Response) -> UpstreamError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    UpstreamError::Status {
        status: status.as_u16(),
        message: extract_message(&status.to_string(), &body),
    }
}

/// Best-effort extraction of an error message from an upstream body.
/// Falls back to the status line when the body has no usable message.
pub(crate) fn extract_message(status_line: &str, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("detail"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("error from PANDA API: {status_line}"))
}

/// Join a path onto the configured base URL.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;
