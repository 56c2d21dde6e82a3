//! Process-wide entry point to the standards backend.
//!
//! The facade builds its backend client lazily on first use and keeps it until
//! [`StandardsFacade::reset`] is called. The next access after a reset runs the
//! factory again, which re-reads configuration.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::ports::{StandardsBackend, StandardsBackendError};
use super::standards::{
    BackendHealth, MatchExpressionParams, MatchExpressionResult, SchemaInfo,
    SearchStandardsParams, SearchStandardsResult, Standard, StandardId,
};

/// Builds a backend client from current configuration.
pub type ClientFactory =
    Box<dyn Fn() -> Result<Arc<dyn StandardsBackend>, StandardsBackendError> + Send + Sync>;

/// Lazily initialised, resettable handle on the backend client.
pub struct StandardsFacade {
    factory: ClientFactory,
    client: RwLock<Option<Arc<dyn StandardsBackend>>>,
}

impl fmt::Debug for StandardsFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initialised = self
            .client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("StandardsFacade")
            .field("initialised", &initialised)
            .finish_non_exhaustive()
    }
}

impl StandardsFacade {
    /// Create a facade around a client factory. No client is built yet.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn StandardsBackend>, StandardsBackendError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            client: RwLock::new(None),
        }
    }

    /// Create a facade whose factory always hands out `client`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ontara_gateway::domain::StandardsFacade;
    /// use ontara_gateway::domain::ports::FixtureStandardsBackend;
    ///
    /// let facade = StandardsFacade::with_client(Arc::new(FixtureStandardsBackend));
    /// let first = facade.client().expect("fixture client");
    /// let second = facade.client().expect("fixture client");
    /// assert!(Arc::ptr_eq(&first, &second));
    /// ```
    pub fn with_client(client: Arc<dyn StandardsBackend>) -> Self {
        Self::new(move || Ok(Arc::clone(&client)))
    }

    /// Return the cached client, building it on first access.
    ///
    /// Concurrent first accesses may both run the factory; exactly one result
    /// is cached and every caller sees that instance afterwards.
    pub fn client(&self) -> Result<Arc<dyn StandardsBackend>, StandardsBackendError> {
        if let Some(client) = self
            .client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(client));
        }

        let built = (self.factory)()?;
        let mut slot = self.client.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(slot.get_or_insert(built)))
    }

    /// Discard the cached client so the next access builds a fresh one.
    pub fn reset(&self) {
        self.client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Classify an expression.
    pub async fn classify(&self, latex: &str) -> Result<MatchExpressionResult, StandardsBackendError> {
        self.client()?.classify(latex).await
    }

    /// Match an expression with options.
    pub async fn match_expression(
        &self,
        params: &MatchExpressionParams,
    ) -> Result<MatchExpressionResult, StandardsBackendError> {
        self.client()?.match_expression(params).await
    }

    /// Search standards.
    pub async fn search(
        &self,
        params: &SearchStandardsParams,
    ) -> Result<SearchStandardsResult, StandardsBackendError> {
        self.client()?.search(params).await
    }

    /// Look up one standard.
    pub async fn get_by_id(&self, id: &StandardId) -> Result<Option<Standard>, StandardsBackendError> {
        self.client()?.get_by_id(id).await
    }

    /// Fetch the ontology schema.
    pub async fn get_schema(&self) -> Result<SchemaInfo, StandardsBackendError> {
        self.client()?.get_schema().await
    }

    /// Backend self-reported health.
    pub async fn health(&self) -> Result<BackendHealth, StandardsBackendError> {
        self.client()?.health().await
    }
}
