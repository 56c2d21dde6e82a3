//! HTTP server configuration object and helpers.

use std::ffi::OsString;
use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use ontara_gateway::outbound::health_probe::HealthProbeSettings;

/// Listener settings read from `GATEWAY_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = "0.0.0.0".to_owned())]
    pub host: String,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
}

impl ServerSettings {
    /// Load settings from the environment only.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when a value cannot be parsed.
    pub fn from_environment() -> std::io::Result<Self> {
        Self::load_from_iter([OsString::from("ontara-gateway")])
            .map_err(|err| std::io::Error::other(format!("invalid server settings: {err}")))
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the host is not an IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let host = self.host.as_str();
        let ip: IpAddr = host.parse().map_err(|err| {
            std::io::Error::other(format!("invalid GATEWAY_HOST {host:?}: {err}"))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) health: HealthProbeSettings,
}

impl ServerConfig {
    /// Configuration binding `bind_addr` with no dependency checks.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            health: HealthProbeSettings::default(),
        }
    }

    /// Attach the health report's dependency settings.
    #[must_use]
    pub fn with_health_settings(mut self, health: HealthProbeSettings) -> Self {
        self.health = health;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Listener settings parsing.

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_bind_all_interfaces() {
        let _guard = lock_env([
            ("GATEWAY_HOST", None::<String>),
            ("GATEWAY_PORT", None::<String>),
        ]);

        let addr = ServerSettings::from_environment()
            .expect("settings load")
            .bind_addr()
            .expect("default address");

        assert_eq!(addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[rstest]
    fn environment_overrides_apply() {
        let _guard = lock_env([
            ("GATEWAY_HOST", Some("127.0.0.1".to_owned())),
            ("GATEWAY_PORT", Some("3000".to_owned())),
        ]);

        let addr = ServerSettings::from_environment()
            .expect("settings load")
            .bind_addr()
            .expect("configured address");

        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
    }

    #[test]
    fn hostnames_are_rejected() {
        let settings = ServerSettings {
            host: "localhost".to_owned(),
            port: 8080,
        };
        assert!(settings.bind_addr().is_err());
    }
}
