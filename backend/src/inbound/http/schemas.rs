//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of utoipa derives. The wrappers below mirror their
//! serialised shape and exist only so the HTTP adapter can document it.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ExpressionOptions`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ExpressionOptions)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ExpressionOptionsSchema {
    /// Minimum confidence, between 0 and 1.
    #[schema(minimum = 0.0, maximum = 1.0, example = 0.7)]
    threshold: Option<f64>,
    /// Maximum number of matches to return.
    #[schema(minimum = 1, example = 5)]
    max_results: Option<u64>,
    /// Include the archetype classification (`/api/match` only).
    include_archetype: Option<bool>,
}

/// OpenAPI schema for classify and match request bodies.
#[derive(ToSchema)]
#[schema(as = crate::domain::MatchExpressionParams)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MatchRequestSchema {
    /// LaTeX source of the expression.
    #[schema(example = "x^2+1")]
    latex: String,
    options: Option<ExpressionOptionsSchema>,
}

/// OpenAPI schema for [`crate::domain::SearchStandardsParams`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SearchStandardsParams)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SearchRequestSchema {
    /// Free-text query.
    #[schema(example = "linear equations")]
    query: Option<String>,
    #[schema(example = "8")]
    grade: Option<String>,
    #[schema(example = "EE")]
    domain: Option<String>,
    /// Page size, at most 100.
    #[schema(minimum = 1, maximum = 100)]
    limit: Option<u64>,
    #[schema(minimum = 0)]
    offset: Option<u64>,
}

/// OpenAPI schema for [`crate::domain::Standard`].
///
/// Fields the gateway does not model are passed through unchanged.
#[derive(ToSchema)]
#[schema(as = crate::domain::Standard)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StandardSchema {
    #[schema(example = "8.EE.1")]
    id: String,
    name: String,
    description: String,
    grade: Option<String>,
    domain: Option<String>,
    subject: Option<String>,
    cluster: Option<String>,
    tags: Option<Vec<String>>,
}

/// OpenAPI schema for [`crate::domain::MatchResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MatchResult)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MatchResultSchema {
    standard_id: String,
    #[schema(example = 0.92)]
    confidence: f64,
    standard: StandardSchema,
}

/// OpenAPI schema for [`crate::domain::MatchExpressionResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MatchExpressionResult)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MatchExpressionResultSchema {
    expression: String,
    matches: Vec<MatchResultSchema>,
}

/// OpenAPI schema for [`crate::domain::SearchStandardsResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SearchStandardsResult)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SearchStandardsResultSchema {
    standards: Vec<StandardSchema>,
    total: u64,
    limit: u64,
    offset: u64,
}

/// OpenAPI schema for [`crate::domain::SchemaInfo`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SchemaInfo)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SchemaInfoSchema {
    #[schema(example = "1.0.0")]
    version: Option<String>,
    node_types: Option<Vec<String>>,
    relationship_types: Option<Vec<String>>,
}

/// OpenAPI schema for [`crate::domain::HealthStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HealthStatus)]
#[schema(rename_all = "lowercase")]
pub enum HealthStatusSchema {
    /// Every configured check passed.
    Healthy,
    /// Exactly one check failed.
    Degraded,
    /// Two or more checks failed.
    Unhealthy,
}

/// OpenAPI schema for [`crate::domain::HealthChecks`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HealthChecks)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HealthChecksSchema {
    server: bool,
    /// Present when a backend URL is configured.
    backend: Option<bool>,
    /// Present when an authentication provider key is configured.
    clerk: Option<bool>,
}

/// OpenAPI schema for [`crate::domain::HealthReport`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HealthReport)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HealthReportSchema {
    status: HealthStatusSchema,
    #[schema(example = "2026-01-01T00:00:00.000Z")]
    timestamp: String,
    checks: HealthChecksSchema,
    /// Milliseconds since the gateway started.
    uptime: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn standard_schema_has_expected_name() {
        assert_eq!(StandardSchema::name(), "crate.domain.Standard");
        assert!(schema_to_json::<StandardSchema>().contains("description"));
    }

    #[test]
    fn match_result_fields_are_camel_case() {
        let schema_json = schema_to_json::<MatchResultSchema>();
        assert!(schema_json.contains("standardId"), "{schema_json}");
        assert!(!schema_json.contains("standard_id"), "{schema_json}");
    }

    #[test]
    fn health_status_lists_every_state() {
        let schema_json = schema_to_json::<HealthStatusSchema>();
        for state in ["healthy", "degraded", "unhealthy"] {
            assert!(schema_json.contains(state), "missing {state}");
        }
    }
}
