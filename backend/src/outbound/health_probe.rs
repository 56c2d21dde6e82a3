//! Reqwest-backed reachability probe.

use std::ffi::OsString;
use std::time::Duration;

use async_trait::async_trait;
use ortho_config::OrthoConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::SettingsError;
use crate::domain::ports::ServiceProbe;

const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Environment settings for the health report's dependency checks.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ONTARA_HEALTH")]
pub struct HealthProbeSettings {
    /// Base URL probed at `{url}/health`. Unset disables the backend check.
    pub backend_url: Option<String>,
    /// Authentication provider key. Only its presence is reported.
    pub auth_provider_key: Option<String>,
    /// Backend probe time limit in milliseconds.
    #[ortho_config(default = 5_000)]
    pub timeout: u64,
}

impl Default for HealthProbeSettings {
    fn default() -> Self {
        Self {
            backend_url: None,
            auth_provider_key: None,
            timeout: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl HealthProbeSettings {
    /// Load settings from the environment only.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the environment holds unparsable values.
    pub fn from_environment() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("ontara-gateway")])
            .map_err(SettingsError::from_display)
    }

    /// Whether an authentication provider key is configured.
    pub fn auth_provider_configured(&self) -> bool {
        self.auth_provider_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Backend probe time limit.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Configured backend probe target, if any.
    pub fn backend_url(&self) -> Option<&str> {
        self.backend_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Issues `GET {base}/health` and reports whether it returned 2xx.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: Client,
    target: Url,
    timeout: Duration,
}

impl HttpHealthProbe {
    /// Probe `{base}/health` with the default five-second limit.
    ///
    /// # Errors
    ///
    /// Returns an error when `base` is not an absolute URL.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let target = Url::parse(&format!("{}/health", base.trim_end_matches('/')))?;
        Ok(Self {
            client: Client::new(),
            target,
            timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        })
    }

    /// Override the probe time limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ServiceProbe for HttpHealthProbe {
    async fn is_reachable(&self) -> bool {
        let request = self.client.get(self.target.clone()).send();
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => response.status().is_success(),
            Ok(Err(err)) => {
                debug!(target_url = %self.target, error = %err, "health probe failed");
                false
            }
            Err(_) => {
                debug!(target_url = %self.target, "health probe timed out");
                false
            }
        }
    }
}
