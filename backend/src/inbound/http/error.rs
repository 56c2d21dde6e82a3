//! HTTP adapter mapping for gateway failures.
//!
//! Purpose: keep [`ApiFailure`] HTTP-agnostic while letting Actix handlers
//! return it directly. Each failure kind maps to one status code and one
//! message policy: validation and auth failures surface their message, network
//! and unknown failures are logged and replaced by a fixed message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{ApiFailure, FailureKind};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiFailure>;

const VALIDATION_ERROR: &str = "Validation Error";
const AUTHENTICATION_ERROR: &str = "Authentication Error";
const NETWORK_ERROR: &str = "Network Error";
const BACKEND_ERROR: &str = "Backend Error";
const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

const INVALID_PARAMETERS_MESSAGE: &str = "Invalid request parameters";
const NETWORK_MESSAGE: &str = "Failed to communicate with backend service";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Error response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorBody {
    /// Failure category label.
    #[schema(example = "Validation Error")]
    pub error: String,
    /// Human-readable detail.
    pub message: String,
    /// Per-field validation issues, when the request itself was invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ApiErrorBody {
    fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_owned(),
            message: message.into(),
            details: None,
        }
    }
}

/// Status code for a failure kind.
pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::SchemaValidation | FailureKind::BackendValidation => StatusCode::BAD_REQUEST,
        FailureKind::BackendAuth => StatusCode::UNAUTHORIZED,
        FailureKind::BackendNetwork => StatusCode::SERVICE_UNAVAILABLE,
        FailureKind::Backend | FailureKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the response body for a failure. Network and unknown causes are
/// never copied into the body.
pub fn error_body(failure: &ApiFailure) -> ApiErrorBody {
    match failure {
        ApiFailure::SchemaValidation(err) => ApiErrorBody {
            details: serde_json::to_value(err.issues()).ok(),
            ..ApiErrorBody::new(VALIDATION_ERROR, INVALID_PARAMETERS_MESSAGE)
        },
        ApiFailure::BackendValidation { message } => {
            ApiErrorBody::new(VALIDATION_ERROR, message.as_str())
        }
        ApiFailure::BackendAuth { message } => {
            ApiErrorBody::new(AUTHENTICATION_ERROR, message.as_str())
        }
        ApiFailure::BackendNetwork { .. } => ApiErrorBody::new(NETWORK_ERROR, NETWORK_MESSAGE),
        ApiFailure::Backend { message } => ApiErrorBody::new(BACKEND_ERROR, message.as_str()),
        ApiFailure::Unknown { .. } => ApiErrorBody::new(INTERNAL_SERVER_ERROR, UNEXPECTED_MESSAGE),
    }
}

fn log_failure(failure: &ApiFailure) {
    let trace_id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
    match failure.kind() {
        FailureKind::Unknown => {
            error!(%trace_id, error = %failure, "unexpected failure while handling request");
        }
        FailureKind::BackendNetwork => {
            warn!(%trace_id, error = %failure, "standards backend unreachable");
        }
        _ => {}
    }
}

impl ResponseError for ApiFailure {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);
        HttpResponse::build(self.status_code()).json(error_body(self))
    }
}
