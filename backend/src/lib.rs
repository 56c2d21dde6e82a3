//! Ontara standards gateway library.
//!
//! A thin HTTP gateway in front of the standards backend: it validates
//! requests, forwards them through a lazily built client and translates
//! failures into a fixed JSON error envelope.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: validation, failure taxonomy, facade and health report.
//! - [`inbound`]: Actix handlers under `/api`.
//! - [`outbound`]: reqwest adapters for the backend and health probe.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
