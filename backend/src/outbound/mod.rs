//! Outbound adapters implementing domain ports for external services.
//!
//! - **ontara**: reqwest client for the standards backend REST API.
//! - **health_probe**: reqwest reachability probe used by the health report.
//!
//! Adapters translate between transport details and domain types. They
//! contain no business logic.

pub mod health_probe;
pub mod ontara;

use std::fmt::Display;

/// Settings could not be loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load settings: {message}")]
pub struct SettingsError {
    message: String,
}

impl SettingsError {
    pub(crate) fn from_display(err: impl Display) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
