//! Backend client configuration loaded via OrthoConfig.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ports::StandardsBackendError;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Environment settings for the standards backend client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ONTARA_API")]
pub struct OntaraClientSettings {
    /// Backend base URL.
    #[ortho_config(default = "http://localhost:3001".to_owned())]
    pub url: String,
    /// API key sent as a bearer token.
    pub key: Option<String>,
    /// Request timeout in milliseconds.
    #[ortho_config(default = 30_000)]
    pub timeout: u64,
    /// Extra attempts after a network failure.
    #[ortho_config(default = 3)]
    pub retries: u32,
    /// Base delay between attempts in milliseconds.
    #[ortho_config(default = 1_000)]
    pub retry_delay: u64,
}

impl OntaraClientSettings {
    /// Load settings from the environment only.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsBackendError::Unexpected`] when a value cannot be
    /// parsed.
    pub fn from_environment() -> Result<Self, StandardsBackendError> {
        Self::load_from_iter([OsString::from("ontara-gateway")])
            .map_err(|err| StandardsBackendError::unexpected(err.to_string()))
    }

    /// Parse the base URL and convert timings.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsBackendError::Unexpected`] when the URL is invalid.
    pub fn resolve(&self) -> Result<OntaraClientConfig, StandardsBackendError> {
        let raw = self.url.as_str();
        let base_url = Url::parse(raw).map_err(|err| {
            StandardsBackendError::unexpected(format!("invalid ONTARA_API_URL {raw:?}: {err}"))
        })?;
        Ok(OntaraClientConfig {
            base_url,
            api_key: self.key.clone().filter(|key| !key.is_empty()),
            timeout: Duration::from_millis(self.timeout),
            retries: self.retries,
            retry_delay: Duration::from_millis(self.retry_delay),
        })
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntaraClientConfig {
    /// Prefix joined with each endpoint path.
    pub base_url: Url,
    /// Bearer token, omitted when unset.
    pub api_key: Option<String>,
    /// Limit for a single attempt.
    pub timeout: Duration,
    /// Extra attempts after a network failure.
    pub retries: u32,
    /// Delay before the first retry; later retries wait proportionally longer.
    pub retry_delay: Duration,
}

impl OntaraClientConfig {
    /// Configuration for `base_url` with default timings and no API key.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }

    /// Replace the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retries(mut self, retries: u32, retry_delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Replace the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
