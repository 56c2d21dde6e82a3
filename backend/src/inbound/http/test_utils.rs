//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use super::api_scope;
use super::state::HttpState;
use crate::domain::ports::StandardsBackend;
use crate::domain::{HealthMonitor, StandardsFacade};

/// Handler state wrapping `backend` with a probe-free health monitor.
pub fn state_with<B>(backend: B) -> web::Data<HttpState>
where
    B: StandardsBackend + 'static,
{
    let standards = Arc::new(StandardsFacade::with_client(Arc::new(backend)));
    let health = Arc::new(HealthMonitor::new(Arc::new(DefaultClock)));
    web::Data::new(HttpState::new(standards, health))
}

/// Application serving the full `/api` scope over `state`.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).service(api_scope())
}

/// Backend-shaped standard record including a field the gateway does not
/// model.
pub fn standard_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Expressions and Equations",
        "description": "Work with radicals and integer exponents.",
        "grade": "8",
        "domain": "EE",
        "identifier": format!("CCSS.MATH.CONTENT.{id}")
    })
}
