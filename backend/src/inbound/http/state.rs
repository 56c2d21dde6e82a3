//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see domain
//! services, so they stay testable without network I/O.

use std::sync::Arc;

use crate::domain::{HealthMonitor, StandardsFacade};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Backend facade shared by the standards routes.
    pub standards: Arc<StandardsFacade>,
    /// Liveness reporter for `/api/health`.
    pub health: Arc<HealthMonitor>,
}

impl HttpState {
    /// Bundle the facade and health monitor.
    pub fn new(standards: Arc<StandardsFacade>, health: Arc<HealthMonitor>) -> Self {
        Self { standards, health }
    }
}
