//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use ontara_gateway::Trace;
#[cfg(debug_assertions)]
use ontara_gateway::doc::ApiDoc;
use ontara_gateway::inbound::http::api_scope;
use ontara_gateway::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope());

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "gateway listening");
    Ok(server)
}
