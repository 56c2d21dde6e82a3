//! Shared cache-control policies for HTTP handlers.

use actix_web::http::header::{self, HeaderName};

/// Probe responses must never be served from a cache.
pub const NO_STORE: &str = "no-store";

/// Header tuple for responses that must not be stored.
pub const fn no_store_header() -> (HeaderName, &'static str) {
    (header::CACHE_CONTROL, NO_STORE)
}
