//! Base URL resolution.

use tracing::debug;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "TODO_API_BASE_URL";

/// Base URL used when the environment does not provide one.
pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(BASE_URL_ENV).ok())
    }

    /// An unset or blank value falls back to `DEFAULT_BASE_URL`.
    pub fn resolve(value: Option<String>) -> Self {
        let base_url = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        debug!(%base_url, "resolved api base url");
        Self { base_url }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}
