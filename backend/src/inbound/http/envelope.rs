//! Success response builders.
//!
//! Payloads are serialised as-is; the envelope only fixes the status code and
//! content type.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned when a lookup finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotFoundBody {
    /// What was not found.
    #[schema(example = "Standard not found")]
    pub error: String,
}

impl NotFoundBody {
    /// Body for a missing resource, for example `Standard not found`.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Respond with `200 OK` and the payload as JSON.
pub fn success<T: Serialize>(data: &T) -> HttpResponse {
    success_with_status(StatusCode::OK, data)
}

/// Respond with the given status and the payload as JSON.
pub fn success_with_status<T: Serialize>(status: StatusCode, data: &T) -> HttpResponse {
    HttpResponse::build(status).json(data)
}
