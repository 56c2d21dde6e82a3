//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api` together with the schema
//! wrappers from [`crate::inbound::http::schemas`]. The document is served by
//! Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::envelope::NotFoundBody;
use crate::inbound::http::error::ApiErrorBody;
use crate::inbound::http::schemas::{
    ExpressionOptionsSchema, HealthChecksSchema, HealthReportSchema, HealthStatusSchema,
    MatchExpressionResultSchema, MatchRequestSchema, MatchResultSchema, SchemaInfoSchema,
    SearchRequestSchema, SearchStandardsResultSchema, StandardSchema,
};

/// OpenAPI document for the gateway REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ontara standards gateway API",
        description = "Classify LaTeX expressions against math standards and browse the standards graph."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::classify::classify,
        crate::inbound::http::classify::match_expression,
        crate::inbound::http::standards::search_by_query,
        crate::inbound::http::standards::search_by_body,
        crate::inbound::http::standards::get_standard,
        crate::inbound::http::standards::get_schema,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        ApiErrorBody,
        NotFoundBody,
        ExpressionOptionsSchema,
        MatchRequestSchema,
        SearchRequestSchema,
        StandardSchema,
        MatchResultSchema,
        MatchExpressionResultSchema,
        SearchStandardsResultSchema,
        SchemaInfoSchema,
        HealthStatusSchema,
        HealthChecksSchema,
        HealthReportSchema,
    )),
    tags(
        (name = "standards", description = "Expression classification and standards lookup"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
