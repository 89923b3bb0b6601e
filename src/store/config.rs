// src/store/config.rs
// =============================================================================
// Connection settings for the Datasette store.
//
// The CLI layer fills this in from flags and DATASETTE_* environment
// variables; nothing below this point reads the environment.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root URL of the Datasette instance
    pub base_url: String,
    /// API token sent as `Authorization: Bearer <token>`
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The token, if one was supplied and isn't blank
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}
