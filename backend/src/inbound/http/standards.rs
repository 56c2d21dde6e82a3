//! Standards lookup and search handlers.
//!
//! ```text
//! GET  /api/standards/search?query=fractions&limit=20
//! POST /api/standards/search {"grade":"4","limit":20}
//! GET  /api/standards/4.NF.1
//! GET  /api/schema
//! ```
//!
//! The search routes must be registered before the id route so `search` is
//! never read as an identifier.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::Value;

use super::ApiResult;
use super::envelope::{NotFoundBody, success, success_with_status};
use super::error::ApiErrorBody;
use super::schemas::{
    SchemaInfoSchema, SearchRequestSchema, SearchStandardsResultSchema, StandardSchema,
};
use super::state::HttpState;
use super::validation::{json_body, search_query};
use crate::domain::validation::{parse_search_request, parse_standard_id};

const STANDARD_NOT_FOUND: &str = "Standard not found";

async fn run_search(state: &HttpState, input: &Value) -> ApiResult<HttpResponse> {
    let params = parse_search_request(input)?;
    let page = state.standards.search(&params).await?;
    Ok(success(&page))
}

/// Search standards using query-string parameters.
#[utoipa::path(
    get,
    path = "/api/standards/search",
    params(
        ("query" = Option<String>, Query, description = "Free-text query"),
        ("grade" = Option<String>, Query, description = "Grade filter"),
        ("domain" = Option<String>, Query, description = "Domain filter"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100"),
        ("offset" = Option<u64>, Query, description = "Results to skip")
    ),
    responses(
        (status = 200, description = "Page of standards", body = SearchStandardsResultSchema),
        (status = 400, description = "Invalid request", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tags = ["standards"],
    operation_id = "searchStandardsByQuery"
)]
#[get("/standards/search")]
pub async fn search_by_query(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    run_search(&state, &search_query(req.query_string())).await
}

/// Search standards using a JSON body.
#[utoipa::path(
    post,
    path = "/api/standards/search",
    request_body = SearchRequestSchema,
    responses(
        (status = 200, description = "Page of standards", body = SearchStandardsResultSchema),
        (status = 400, description = "Invalid request", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tags = ["standards"],
    operation_id = "searchStandards"
)]
#[post("/standards/search")]
pub async fn search_by_body(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    run_search(&state, &json_body(&body)?).await
}

/// Fetch one standard.
///
/// A missing standard is answered with `404 {"error":"Standard not found"}`
/// rather than the error envelope.
#[utoipa::path(
    get,
    path = "/api/standards/{id}",
    params(("id" = String, Path, description = "Standard identifier")),
    responses(
        (status = 200, description = "The standard", body = StandardSchema),
        (status = 400, description = "Empty identifier", body = ApiErrorBody),
        (status = 404, description = "Unknown identifier", body = NotFoundBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tags = ["standards"],
    operation_id = "getStandard"
)]
#[get("/standards/{id:[^/]*}")]
pub async fn get_standard(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_standard_id(&path.into_inner())?;
    let response = match state.standards.get_by_id(&id).await? {
        Some(standard) => success(&standard),
        None => {
            success_with_status(StatusCode::NOT_FOUND, &NotFoundBody::new(STANDARD_NOT_FOUND))
        }
    };
    Ok(response)
}

/// Describe the backend's standards graph.
#[utoipa::path(
    get,
    path = "/api/schema",
    responses(
        (status = 200, description = "Graph schema", body = SchemaInfoSchema),
        (status = 500, description = "Internal server error", body = ApiErrorBody),
        (status = 503, description = "Backend unreachable", body = ApiErrorBody)
    ),
    tags = ["standards"],
    operation_id = "getSchema"
)]
#[get("/schema")]
pub async fn get_schema(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let schema = state.standards.get_schema().await?;
    Ok(success(&schema))
}
