use crate::error::{ApiError, Result};
use std::env;
use std::time::Duration;

/// Environment variable holding the explorer backend base URL.
pub const BACKEND_URL_VAR: &str = "ARCHIVECHAIN_BACKEND_URL";
/// Environment variable holding the storage node base URL.
pub const STORAGE_URL_VAR: &str = "ARCHIVECHAIN_STORAGE_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "ARCHIVECHAIN_TIMEOUT_SECS";

const DEFAULT_URL: &str = "https://archivechain.pt";

/// Configuration for [`HttpExplorerClient`](crate::HttpExplorerClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Base URL serving `/explorer/*`.
    pub backend_url: String,
    /// Base URL serving `/storage/retrieveFile`.
    pub storage_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_URL.to_string(),
            storage_url: DEFAULT_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ExplorerConfig {
    /// Builds a configuration from the environment, falling back to defaults
    /// for unset variables. The storage URL defaults to the backend URL.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the timeout is not a number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let backend_url = lookup(BACKEND_URL_VAR).unwrap_or(defaults.backend_url);
        let storage_url = lookup(STORAGE_URL_VAR).unwrap_or_else(|| backend_url.clone());
        let request_timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{TIMEOUT_VAR} must be a number, got `{raw}`")))?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            backend_url,
            storage_url,
            request_timeout_secs,
        })
    }

    /// Overrides the backend URL.
    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Overrides the storage node URL.
    #[must_use]
    pub fn with_storage_url(mut self, url: impl Into<String>) -> Self {
        self.storage_url = url.into();
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
