//! Connection settings for the REST backend.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings used to reach the REST backend.
///
/// # Examples
///
/// ```
/// use quadro::board::adapters::http::HttpBackendConfig;
///
/// let config = HttpBackendConfig::from_json(r#"{"baseUrl": "https://crm.example/api"}"#)
///     .expect("valid configuration");
/// assert_eq!(config.base_url, "https://crm.example/api");
/// assert_eq!(config.timeout_secs, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpBackendConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Bearer token sent with every request, if any.
    pub bearer_token: Option<String>,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_owned(),
            timeout_secs: 10,
            bearer_token: None,
        }
    }
}

impl HttpBackendConfig {
    /// Creates a configuration for `base_url` with default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Parses a JSON configuration; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
