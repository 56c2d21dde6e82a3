//! Driven port for the remote standards classification service.
//!
//! The domain owns the request and response contract; adapters translate
//! transport failures into [`StandardsBackendError`] so the HTTP layer can map
//! them onto the public failure taxonomy without knowing the transport.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::define_port_error;
use crate::domain::standards::{
    BackendHealth, MatchExpressionParams, MatchExpressionResult, SchemaInfo,
    SearchStandardsParams, SearchStandardsResult, Standard, StandardId,
};

define_port_error! {
    /// Failures reported by the standards backend.
    pub enum StandardsBackendError {
        /// The backend rejected the request parameters.
        Validation = "backend rejected request",
        /// The backend refused the configured credentials.
        Auth = "backend authentication failed",
        /// The backend could not be reached or asked the caller to back off.
        Network = "backend unreachable"; retryable,
        /// The backend reported any other failure.
        Backend = "backend error",
        /// The client failed outside the backend's own failure vocabulary.
        Unexpected = "unexpected backend client failure",
    }
}

/// Port for the remote standards service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StandardsBackend: Send + Sync {
    /// Classify a LaTeX expression against curriculum standards.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use ontara_gateway::domain::ports::{FixtureStandardsBackend, StandardsBackend};
    ///
    /// let result = FixtureStandardsBackend.classify("x^2").await?;
    /// assert_eq!(result.expression(), Some("x^2"));
    /// assert!(result.matches().is_empty());
    /// # Ok::<(), ontara_gateway::domain::ports::StandardsBackendError>(())
    /// ```
    async fn classify(&self, latex: &str) -> Result<MatchExpressionResult, StandardsBackendError>;

    /// Match an expression with matcher options.
    async fn match_expression(
        &self,
        params: &MatchExpressionParams,
    ) -> Result<MatchExpressionResult, StandardsBackendError>;

    /// Search standards.
    async fn search(
        &self,
        params: &SearchStandardsParams,
    ) -> Result<SearchStandardsResult, StandardsBackendError>;

    /// Fetch a standard by identifier, or `None` when it does not exist.
    async fn get_by_id(&self, id: &StandardId) -> Result<Option<Standard>, StandardsBackendError>;

    /// Describe the backend's ontology schema.
    async fn get_schema(&self) -> Result<SchemaInfo, StandardsBackendError>;

    /// Backend self-reported health.
    async fn health(&self) -> Result<BackendHealth, StandardsBackendError>;
}

/// Fixture implementation with no standards.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureStandardsBackend;

#[async_trait]
impl StandardsBackend for FixtureStandardsBackend {
    async fn classify(&self, latex: &str) -> Result<MatchExpressionResult, StandardsBackendError> {
        Ok(MatchExpressionResult::empty(latex))
    }

    async fn match_expression(
        &self,
        params: &MatchExpressionParams,
    ) -> Result<MatchExpressionResult, StandardsBackendError> {
        Ok(MatchExpressionResult::empty(params.latex.as_str()))
    }

    async fn search(
        &self,
        params: &SearchStandardsParams,
    ) -> Result<SearchStandardsResult, StandardsBackendError> {
        Ok(SearchStandardsResult::page(
            Vec::new(),
            0,
            params.limit.unwrap_or(10),
            params.offset.unwrap_or(0),
        ))
    }

    async fn get_by_id(&self, _id: &StandardId) -> Result<Option<Standard>, StandardsBackendError> {
        Ok(None)
    }

    async fn get_schema(&self) -> Result<SchemaInfo, StandardsBackendError> {
        let fields = [
            ("version".to_owned(), Value::from("1.0.0")),
            ("nodeTypes".to_owned(), Value::Array(Vec::new())),
            ("relationshipTypes".to_owned(), Value::Array(Vec::new())),
        ];
        Ok(SchemaInfo::from(fields.into_iter().collect::<Map<String, Value>>()))
    }

    async fn health(&self) -> Result<BackendHealth, StandardsBackendError> {
        Ok(BackendHealth {
            status: "ok".to_owned(),
            service: "ontara-mcp".to_owned(),
            version: "1.0.0".to_owned(),
        })
    }
}
