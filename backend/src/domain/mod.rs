//! Domain types and services for the standards gateway.
//!
//! Purpose: keep request validation, the failure taxonomy and the backend
//! contract independent of HTTP. Inbound adapters parse raw input with
//! [`validation`], call the [`StandardsFacade`], and translate [`ApiFailure`]
//! into their own envelope.
//!
//! Public surface:
//! - ApiFailure / FailureKind — the closed failure taxonomy.
//! - StandardsFacade — lazily built, resettable handle on the backend port.
//! - HealthMonitor — liveness report for the gateway and its dependencies.
//! - Request and response value objects from [`standards`].

pub mod error;
pub mod health;
pub mod permissions;
pub mod ports;
pub mod standards;
pub mod standards_facade;
pub mod validation;

pub use self::error::{ApiFailure, FailureKind};
pub use self::health::{HealthChecks, HealthMonitor, HealthReport, HealthStatus};
pub use self::permissions::{UserContext, UserRole};
pub use self::standards::{
    BackendHealth, ClassifyRequest, ExpressionOptions, MatchExpressionParams,
    MatchExpressionResult, MatchResult, SchemaInfo, SearchStandardsParams, SearchStandardsResult,
    Standard, StandardId,
};
pub use self::standards_facade::{ClientFactory, StandardsFacade};
pub use self::validation::{IssueCode, ValidationError, ValidationIssue};
