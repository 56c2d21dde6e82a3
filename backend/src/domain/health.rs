//! Liveness classification for the gateway and its dependencies.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::OptionFuture;
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::ports::ServiceProbe;

/// Overall health derived from the individual checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every configured check passed.
    Healthy,
    /// Exactly one check failed.
    Degraded,
    /// Two or more checks failed.
    Unhealthy,
}

impl HealthStatus {
    /// Classify by the number of failed checks: none is healthy, one is
    /// degraded, two or more is unhealthy. Skipped checks do not count.
    pub fn from_checks(checks: &HealthChecks) -> Self {
        let failed = [Some(checks.server), checks.backend, checks.clerk]
            .into_iter()
            .filter(|check| *check == Some(false))
            .count();
        match failed {
            0 => Self::Healthy,
            1 => Self::Degraded,
            _ => Self::Unhealthy,
        }
    }

    /// Whether the status should be served as a successful response.
    pub fn is_available(self) -> bool {
        !matches!(self, Self::Unhealthy)
    }
}

/// Individual check results. `None` means the check was not configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthChecks {
    /// Whether the gateway itself is serving.
    pub server: bool,
    /// Whether the backend answered its health endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<bool>,
    /// Whether an authentication provider key is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clerk: Option<bool>,
}

/// Health response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Classification of `checks`.
    pub status: HealthStatus,
    /// RFC 3339 timestamp with millisecond precision.
    pub timestamp: String,
    /// Individual check results.
    pub checks: HealthChecks,
    /// Milliseconds since the monitor was created.
    pub uptime: u64,
}

/// Produces [`HealthReport`]s from the configured probes.
#[derive(Clone)]
pub struct HealthMonitor {
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
    server: Option<Arc<dyn ServiceProbe>>,
    backend: Option<Arc<dyn ServiceProbe>>,
    auth_provider_configured: bool,
}

impl HealthMonitor {
    /// Start a monitor; uptime is measured from now.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.utc();
        Self {
            clock,
            started_at,
            server: None,
            backend: None,
            auth_provider_configured: false,
        }
    }

    /// Replace the server self-check, which otherwise always passes.
    #[must_use]
    pub fn with_server_probe(mut self, probe: Arc<dyn ServiceProbe>) -> Self {
        self.server = Some(probe);
        self
    }

    /// Probe the backend on each report.
    #[must_use]
    pub fn with_backend_probe(mut self, probe: Arc<dyn ServiceProbe>) -> Self {
        self.backend = Some(probe);
        self
    }

    /// Record that an authentication provider key is present.
    #[must_use]
    pub fn with_auth_provider(mut self, configured: bool) -> Self {
        self.auth_provider_configured = configured;
        self
    }

    /// Run the checks and classify the result.
    pub async fn report(&self) -> HealthReport {
        let server = OptionFuture::from(self.server.as_ref().map(|probe| probe.is_reachable()))
            .await
            .unwrap_or(true);
        let backend =
            OptionFuture::from(self.backend.as_ref().map(|probe| probe.is_reachable())).await;
        let checks = HealthChecks {
            server,
            backend,
            clerk: self.auth_provider_configured.then_some(true),
        };
        let now = self.clock.utc();
        let uptime = u64::try_from((now - self.started_at).num_milliseconds()).unwrap_or(0);

        HealthReport {
            status: HealthStatus::from_checks(&checks),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            checks,
            uptime,
        }
    }
}
