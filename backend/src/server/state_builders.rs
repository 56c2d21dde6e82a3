//! Builders for the HTTP handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use ontara_gateway::domain::{HealthMonitor, StandardsFacade};
use ontara_gateway::inbound::http::state::HttpState;
use ontara_gateway::outbound::health_probe::{HealthProbeSettings, HttpHealthProbe};
use ontara_gateway::outbound::ontara::client_from_environment;

use super::ServerConfig;

/// Build the health monitor, probing the backend when a URL is configured.
///
/// An unparsable probe URL disables the backend check rather than failing
/// start-up.
fn build_health_monitor(settings: &HealthProbeSettings) -> HealthMonitor {
    let monitor = HealthMonitor::new(Arc::new(DefaultClock))
        .with_auth_provider(settings.auth_provider_configured());
    match settings.backend_url().map(HttpHealthProbe::new) {
        Some(Ok(probe)) => {
            info!(target_url = ?settings.backend_url(), "backend health check enabled");
            monitor.with_backend_probe(Arc::new(probe.with_timeout(settings.probe_timeout())))
        }
        Some(Err(err)) => {
            warn!(error = %err, "invalid backend health URL; backend check disabled");
            monitor
        }
        None => monitor,
    }
}

/// Assemble handler state. The backend client is built lazily on first use.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let standards = Arc::new(StandardsFacade::new(client_from_environment));
    let health = Arc::new(build_health_monitor(&config.health));
    web::Data::new(HttpState::new(standards, health))
}
