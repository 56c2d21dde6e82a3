//! Expression classification handlers.
//!
//! ```text
//! POST /api/classify {"latex":"x^2+1"}
//! POST /api/match {"latex":"x^2+1","options":{"maxResults":5}}
//! ```

use actix_web::{HttpResponse, post, web};

use super::ApiResult;
use super::envelope::success;
use super::error::ApiErrorBody;
use super::schemas::{MatchExpressionResultSchema, MatchRequestSchema};
use super::state::HttpState;
use super::validation::json_body;
use crate::domain::validation::{parse_classify_request, parse_match_request};

/// Classify a LaTeX expression against the standards graph.
///
/// Only `latex` is forwarded; `options` are validated but the backend's
/// classification uses its own defaults.
#[utoipa::path(
    post,
    path = "/api/classify",
    request_body = MatchRequestSchema,
    responses(
        (status = 200, description = "Matching standards", body = MatchExpressionResultSchema),
        (status = 400, description = "Invalid request", body = ApiErrorBody),
        (status = 401, description = "Backend rejected credentials", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody),
        (status = 503, description = "Backend unreachable", body = ApiErrorBody)
    ),
    tags = ["standards"],
    operation_id = "classifyExpression"
)]
#[post("/classify")]
pub async fn classify(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request = parse_classify_request(&json_body(&body)?)?;
    let result = state.standards.classify(&request.latex).await?;
    Ok(success(&result))
}

/// Match a LaTeX expression with explicit tuning options.
#[utoipa::path(
    post,
    path = "/api/match",
    request_body = MatchRequestSchema,
    responses(
        (status = 200, description = "Matching standards", body = MatchExpressionResultSchema),
        (status = 400, description = "Invalid request", body = ApiErrorBody),
        (status = 401, description = "Backend rejected credentials", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody),
        (status = 503, description = "Backend unreachable", body = ApiErrorBody)
    ),
    tags = ["standards"],
    operation_id = "matchExpression"
)]
#[post("/match")]
pub async fn match_expression(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let params = parse_match_request(&json_body(&body)?)?;
    let result = state.standards.match_expression(&params).await?;
    Ok(success(&result))
}
