//! Gateway entry-point: loads settings, wires the REST API and serves it.

mod server;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use ontara_gateway::outbound::health_probe::HealthProbeSettings;

use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = ServerSettings::from_environment()?.bind_addr()?;
    let health = HealthProbeSettings::from_environment().map_err(std::io::Error::other)?;
    let config = ServerConfig::new(bind_addr).with_health_settings(health);

    create_server(config)?.await
}
