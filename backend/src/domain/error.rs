//! Failure taxonomy shared by every gateway operation.
//!
//! Failures are transport agnostic. The inbound HTTP adapter maps each
//! [`FailureKind`] to a status code and a response body; nothing else in the
//! domain knows about HTTP.

use super::ports::StandardsBackendError;
use super::validation::ValidationError;

/// Closed set of failure categories, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Request input failed local validation.
    SchemaValidation,
    /// The backend rejected the request parameters.
    BackendValidation,
    /// The backend refused the configured credentials.
    BackendAuth,
    /// The backend could not be reached.
    BackendNetwork,
    /// The backend reported some other failure.
    Backend,
    /// Anything outside the recognised categories.
    Unknown,
}

/// A failed gateway operation.
///
/// # Examples
/// ```
/// use ontara_gateway::domain::{ApiFailure, FailureKind};
/// use ontara_gateway::domain::ports::StandardsBackendError;
///
/// let failure = ApiFailure::from(StandardsBackendError::network("connection refused"));
/// assert_eq!(failure.kind(), FailureKind::BackendNetwork);
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiFailure {
    /// Local validation failed.
    #[error(transparent)]
    SchemaValidation(#[from] ValidationError),
    /// The backend rejected the request parameters.
    #[error("backend validation failed: {message}")]
    BackendValidation {
        /// Backend-supplied detail.
        message: String,
    },
    /// The backend refused the configured credentials.
    #[error("backend authentication failed: {message}")]
    BackendAuth {
        /// Backend-supplied detail.
        message: String,
    },
    /// The backend could not be reached.
    #[error("backend unreachable: {message}")]
    BackendNetwork {
        /// Transport detail, never shown to callers.
        message: String,
    },
    /// The backend reported some other failure.
    #[error("backend failure: {message}")]
    Backend {
        /// Backend-supplied detail.
        message: String,
    },
    /// Unrecognised failure; `message` is for logs only.
    #[error("unexpected failure: {message}")]
    Unknown {
        /// Diagnostic detail for logs.
        message: String,
    },
}

impl ApiFailure {
    /// Wrap an unrecognised failure.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Category used to pick the response status and message policy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::SchemaValidation(_) => FailureKind::SchemaValidation,
            Self::BackendValidation { .. } => FailureKind::BackendValidation,
            Self::BackendAuth { .. } => FailureKind::BackendAuth,
            Self::BackendNetwork { .. } => FailureKind::BackendNetwork,
            Self::Backend { .. } => FailureKind::Backend,
            Self::Unknown { .. } => FailureKind::Unknown,
        }
    }
}

impl From<StandardsBackendError> for ApiFailure {
    fn from(err: StandardsBackendError) -> Self {
        match err {
            StandardsBackendError::Validation { message } => Self::BackendValidation { message },
            StandardsBackendError::Auth { message } => Self::BackendAuth { message },
            StandardsBackendError::Network { message } => Self::BackendNetwork { message },
            StandardsBackendError::Backend { message } => Self::Backend { message },
            StandardsBackendError::Unexpected { message } => Self::Unknown { message },
        }
    }
}

#[cfg(test)]
mod tests;
