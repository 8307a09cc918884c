//! Environment-driven application configuration.
//!
//! DESIGN
//! ======
//! Everything is read once at startup into a typed `AppConfig` that route
//! handlers and backends receive through shared state. The same `mock` /
//! `delegated` switch drives both the auth adapter and the search proxy, so
//! the two historical variants of each live behind one configuration knob
//! instead of duplicated code paths.

use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PANDA_API_URL: &str = "http://localhost:9002";
const DEFAULT_LANDING_PATH: &str = "/";

/// Which implementation backs an adapter: the in-memory mock or the
/// delegated PANDA backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Mock,
    Delegated,
}

impl FromStr for BackendMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "delegated" => Ok(Self::Delegated),
            _ => Err(ConfigError::InvalidMode { value: raw.to_owned() }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend mode {value:?} (expected \"mock\" or \"delegated\")")]
    InvalidMode { value: String },
}

/// Typed application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the server binds to.
    pub port: u16,
    /// Base URL of the delegated PANDA backend.
    pub panda_api_url: String,
    /// Which implementation handles login/register.
    pub auth_mode: BackendMode,
    /// Which implementation handles `/api/search`.
    pub search_mode: BackendMode,
    /// Where authenticated users land when visiting `/login` or `/register`.
    pub landing_path: String,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `AUTH_MODE` or `SEARCH_MODE` is set to an
    /// unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT),
            panda_api_url: env_trimmed("PANDA_API_URL")
                .unwrap_or_else(|| DEFAULT_PANDA_API_URL.to_owned()),
            auth_mode: env_mode("AUTH_MODE")?,
            search_mode: env_mode("SEARCH_MODE")?,
            landing_path: env_trimmed("LANDING_PATH")
                .unwrap_or_else(|| DEFAULT_LANDING_PATH.to_owned()),
            cookie_secure: cookie_secure(),
        })
    }
}

fn env_trimmed(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_mode(key: &str) -> Result<BackendMode, ConfigError> {
    env_trimmed(key).map_or(Ok(BackendMode::Mock), |raw| raw.parse())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// `COOKIE_SECURE` overrides; otherwise secure cookies follow
/// `APP_ENV=production`.
fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("APP_ENV")
        .map(|env| env.trim().eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
