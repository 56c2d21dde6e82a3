//! Standards backend outbound adapter.
//!
//! Provides the reqwest implementation of the `StandardsBackend` port and the
//! environment-driven factory the composition root hands to the facade.

mod config;
mod http_client;

use std::sync::Arc;

pub use config::{OntaraClientConfig, OntaraClientSettings};
pub use http_client::OntaraHttpClient;

use crate::domain::ports::{StandardsBackend, StandardsBackendError};

/// Build a backend client from the current environment.
///
/// Settings are read on every call so a facade reset picks up changes.
///
/// # Errors
///
/// Returns [`StandardsBackendError::Unexpected`] when configuration is invalid
/// or the HTTP client cannot be constructed.
pub fn client_from_environment() -> Result<Arc<dyn StandardsBackend>, StandardsBackendError> {
    let config = OntaraClientSettings::from_environment()?.resolve()?;
    let client = OntaraHttpClient::new(config)
        .map_err(|err| StandardsBackendError::unexpected(err.to_string()))?;
    Ok(Arc::new(client))
}
