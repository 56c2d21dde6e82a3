//! End-to-end behaviour of the gateway against an in-process standards
//! backend, exercising the reqwest adapter, facade, handlers and middleware
//! together.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};
use url::Url;

use ontara_gateway::Trace;
use ontara_gateway::domain::ports::{
    FixtureServiceProbe, StandardsBackend, StandardsBackendError,
};
use ontara_gateway::domain::{HealthMonitor, StandardsFacade};
use ontara_gateway::inbound::http::api_scope;
use ontara_gateway::inbound::http::state::HttpState;
use ontara_gateway::middleware::trace::TRACE_ID_HEADER;
use ontara_gateway::outbound::ontara::{OntaraClientConfig, OntaraHttpClient};

struct Backend {
    base_url: Url,
    handle: ServerHandle,
}

async fn classify(body: web::Json<Value>) -> HttpResponse {
    match body.get("latex").and_then(Value::as_str) {
        Some("\\invalid") => {
            HttpResponse::BadRequest().json(json!({ "message": "Unsupported LaTeX command" }))
        }
        Some(latex) => HttpResponse::Ok().json(json!({
            "expression": latex,
            "matches": [{
                "standardId": "A-SSE.1",
                "confidence": 0.81,
                "standard": {
                    "id": "A-SSE.1",
                    "name": "Seeing Structure in Expressions",
                    "description": "Interpret expressions that represent a quantity."
                }
            }]
        })),
        None => HttpResponse::InternalServerError().finish(),
    }
}

async fn search(body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "standards": [],
        "total": 0,
        "limit": body.get("limit").cloned().unwrap_or(json!(10)),
        "offset": body.get("offset").cloned().unwrap_or(json!(0)),
        "received": body.into_inner()
    }))
}

async fn standard(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "8.EE.1" => HttpResponse::Ok().json(json!({
            "id": "8.EE.1",
            "name": "Integer exponents",
            "description": "Know and apply the properties of integer exponents."
        })),
        _ => HttpResponse::NotFound().finish(),
    }
}

async fn spawn_backend() -> Backend {
    let server = HttpServer::new(|| {
        App::new().service(
            web::scope("/api")
                .route("/classify", web::post().to(classify))
                .route("/standards/search", web::post().to(search))
                .route("/standards/{id}", web::get().to(standard)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind ephemeral port");
    let addr: SocketAddr = *server.addrs().first().expect("bound address");
    let running = server.run();
    let handle = running.handle();
    actix_web::rt::spawn(running);

    Backend {
        base_url: Url::parse(&format!("http://{addr}/api")).expect("valid base URL"),
        handle,
    }
}

fn gateway_state(base_url: Url) -> web::Data<HttpState> {
    let config = OntaraClientConfig::new(base_url)
        .with_retries(0, Duration::from_millis(1))
        .with_timeout(Duration::from_secs(5));
    let standards = StandardsFacade::new(move || {
        let client = OntaraHttpClient::new(config.clone())
            .map_err(|err| StandardsBackendError::unexpected(err.to_string()))?;
        Ok(Arc::new(client) as Arc<dyn StandardsBackend>)
    });
    let health = HealthMonitor::new(Arc::new(DefaultClock))
        .with_backend_probe(Arc::new(FixtureServiceProbe { reachable: false }))
        .with_auth_provider(true);
    web::Data::new(HttpState::new(Arc::new(standards), Arc::new(health)))
}

macro_rules! gateway {
    ($base_url:expr) => {
        test::init_service(
            App::new()
                .app_data(gateway_state($base_url))
                .wrap(Trace)
                .service(api_scope()),
        )
        .await
    };
}

#[actix_web::test]
async fn classify_round_trips_through_the_backend() {
    let backend = spawn_backend().await;
    let app = gateway!(backend.base_url.clone());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/classify")
            .set_json(json!({ "latex": "x^2+1" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["expression"], "x^2+1");
    assert_eq!(body["matches"][0]["standardId"], "A-SSE.1");
    backend.handle.stop(false).await;
}

#[actix_web::test]
async fn backend_rejections_surface_their_message() {
    let backend = spawn_backend().await;
    let app = gateway!(backend.base_url.clone());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/classify")
            .set_json(json!({ "latex": "\\invalid" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({ "error": "Validation Error", "message": "Unsupported LaTeX command" })
    );
    backend.handle.stop(false).await;
}

#[actix_web::test]
async fn query_search_sends_only_present_fields() {
    let backend = spawn_backend().await;
    let app = gateway!(backend.base_url.clone());

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/standards/search?query=&grade=7&limit=25")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["received"], json!({ "grade": "7", "limit": 25 }));
    assert_eq!(body["limit"], 25);
    backend.handle.stop(false).await;
}

#[actix_web::test]
async fn unknown_standard_is_a_plain_404() {
    let backend = spawn_backend().await;
    let app = gateway!(backend.base_url.clone());

    let found = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/standards/8.EE.1").to_request(),
    )
    .await;
    assert_eq!(found.status(), StatusCode::OK);

    let missing = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/standards/0.XX.0").to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(missing).await;
    assert_eq!(body, json!({ "error": "Standard not found" }));
    backend.handle.stop(false).await;
}

#[actix_web::test]
async fn unreachable_backend_hides_transport_detail() {
    let app = gateway!(Url::parse("http://127.0.0.1:9/api").expect("valid URL"));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/classify")
            .set_json(json!({ "latex": "x" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({
            "error": "Network Error",
            "message": "Failed to communicate with backend service"
        })
    );
}

#[actix_web::test]
async fn health_reports_a_failed_dependency_as_degraded() {
    let app = gateway!(Url::parse("http://127.0.0.1:9/api").expect("valid URL"));

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(
        body["checks"],
        json!({ "server": true, "backend": false, "clerk": true })
    );
}
