//! HTTP inbound adapter exposing the gateway's REST endpoints.
//!
//! Every route lives under `/api`. Handlers decode raw input, validate it via
//! [`crate::domain::validation`], call the [`crate::domain::StandardsFacade`]
//! and answer with the payload verbatim or an [`error::ApiErrorBody`].

use actix_web::{Scope, web};

pub mod cache_control;
pub mod classify;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod standards;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

pub use error::ApiResult;

/// The `/api` scope with every gateway route registered.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use ontara_gateway::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(classify::classify)
        .service(classify::match_expression)
        .service(standards::search_by_query)
        .service(standards::search_by_body)
        .service(standards::get_standard)
        .service(standards::get_schema)
        .service(health::health)
}
