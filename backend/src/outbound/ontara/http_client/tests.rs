//! Exercises the client against an in-process backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::validation::parse_standard_id;

/// Requests seen by the fake backend.
#[derive(Default)]
struct Seen {
    flaky_calls: AtomicUsize,
}

struct FakeBackend {
    base_url: Url,
    handle: ServerHandle,
    seen: Arc<Seen>,
}

impl FakeBackend {
    async fn stop(self) {
        self.handle.stop(false).await;
    }

    fn client(&self, retries: u32) -> OntaraHttpClient {
        let config = OntaraClientConfig::new(self.base_url.clone())
            .with_api_key("test-key")
            .with_retries(retries, Duration::from_millis(1))
            .with_timeout(Duration::from_secs(5));
        OntaraHttpClient::new(config).expect("client builds")
    }
}

fn standard_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Expressions",
        "description": "Write and evaluate numerical expressions",
        "grade": "8",
        "identifier": format!("CCSS.{id}")
    })
}

async fn classify(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    let authorised = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-key");
    if !authorised {
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid API key" }));
    }
    HttpResponse::Ok().json(json!({
        "expression": body.get("latex").cloned().unwrap_or(Value::Null),
        "matches": [{
            "standardId": "8.EE.1",
            "confidence": 0.92,
            "standard": standard_json("8.EE.1")
        }],
        "processingTimeMs": 12
    }))
}

async fn search(body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "standards": [],
        "total": 0,
        "limit": body.get("limit").cloned().unwrap_or(json!(10)),
        "offset": 0,
        "echo": body.into_inner()
    }))
}

async fn standard(path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match id.as_str() {
        "missing" => HttpResponse::NotFound().finish(),
        "broken" => HttpResponse::Ok().body("not json"),
        "sparse" => HttpResponse::Ok()
            .content_type("application/json")
            .body(r#"{"grade":null,"id":"sparse","name":"Sparse","tags":null}"#),
        _ => HttpResponse::Ok().json(standard_json(&id)),
    }
}

async fn flaky(seen: web::Data<Seen>) -> HttpResponse {
    let call = seen.flaky_calls.fetch_add(1, Ordering::SeqCst);
    if call == 0 {
        HttpResponse::ServiceUnavailable().body("warming up")
    } else {
        HttpResponse::Ok().json(json!({ "status": "ok", "service": "ontara-mcp", "version": "2.0.0" }))
    }
}

async fn unavailable(seen: web::Data<Seen>) -> HttpResponse {
    seen.flaky_calls.fetch_add(1, Ordering::SeqCst);
    HttpResponse::ServiceUnavailable().json(json!({ "message": "graph database offline" }))
}

async fn rejected() -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(json!({ "message": "grade must be K-12" }))
}

async fn spawn_backend(health_flaky: bool) -> FakeBackend {
    let seen = web::Data::new(Seen::default());
    let state = seen.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .route("/api/classify", web::post().to(classify))
            .route("/api/match", web::post().to(rejected))
            .route("/api/standards/search", web::post().to(search))
            .route("/api/standards/{id}", web::get().to(standard));
        if health_flaky {
            app.route("/api/health", web::get().to(flaky))
        } else {
            app.route("/api/health", web::get().to(unavailable))
        }
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind ephemeral port");
    let addr: SocketAddr = *server.addrs().first().expect("bound address");
    let running = server.run();
    let handle = running.handle();
    actix_web::rt::spawn(running);

    FakeBackend {
        base_url: Url::parse(&format!("http://{addr}/api")).expect("valid base URL"),
        handle,
        seen: seen.into_inner(),
    }
}

#[actix_web::test]
async fn classify_sends_bearer_key_and_keeps_extra_fields() {
    let backend = spawn_backend(true).await;

    let result = backend.client(0).classify("x^2+1").await.expect("classify succeeds");

    assert_eq!(result.expression(), Some("x^2+1"));
    assert_eq!(result.matches().len(), 1);
    assert_eq!(result.get("processingTimeMs"), Some(&json!(12)));
    backend.stop().await;
}

#[actix_web::test]
async fn missing_key_maps_to_auth() {
    let backend = spawn_backend(true).await;
    let config = OntaraClientConfig::new(backend.base_url.clone())
        .with_retries(0, Duration::from_millis(1));
    let client = OntaraHttpClient::new(config).expect("client builds");

    let err = client.classify("x").await.expect_err("unauthorised");

    assert_eq!(err, StandardsBackendError::auth("Invalid API key"));
    backend.stop().await;
}

#[actix_web::test]
async fn search_omits_absent_params() {
    let backend = spawn_backend(true).await;

    let page = backend
        .client(0)
        .search(&SearchStandardsParams::default())
        .await
        .expect("search succeeds");

    assert_eq!(page.limit(), Some(10));
    assert_eq!(page.get("echo"), Some(&json!({})));
    backend.stop().await;
}

#[rstest]
#[case("8.EE.1", true)]
#[case("missing", false)]
#[actix_web::test]
async fn get_by_id_treats_404_as_absent(#[case] raw: &str, #[case] found: bool) {
    let backend = spawn_backend(true).await;
    let id = parse_standard_id(raw).expect("non-empty id");

    let standard = backend.client(0).get_by_id(&id).await.expect("lookup succeeds");

    assert_eq!(standard.is_some(), found);
    backend.stop().await;
}

#[actix_web::test]
async fn sparse_standards_pass_through_unchanged() {
    let backend = spawn_backend(true).await;
    let id = parse_standard_id("sparse").expect("non-empty id");

    let standard = backend
        .client(0)
        .get_by_id(&id)
        .await
        .expect("lookup succeeds")
        .expect("standard exists");

    assert_eq!(standard.description(), None);
    assert_eq!(
        serde_json::to_value(&standard).expect("encodes"),
        json!({ "grade": null, "id": "sparse", "name": "Sparse", "tags": null })
    );
    backend.stop().await;
}

#[actix_web::test]
async fn undecodable_success_is_unexpected() {
    let backend = spawn_backend(true).await;
    let id = parse_standard_id("broken").expect("non-empty id");

    let err = backend.client(0).get_by_id(&id).await.expect_err("body is not JSON");

    assert!(matches!(err, StandardsBackendError::Unexpected { .. }));
    backend.stop().await;
}

#[actix_web::test]
async fn unprocessable_maps_to_validation() {
    let backend = spawn_backend(true).await;
    let params = MatchExpressionParams {
        latex: "x".to_owned(),
        options: None,
    };

    let err = backend
        .client(3)
        .match_expression(&params)
        .await
        .expect_err("backend rejects");

    assert_eq!(err, StandardsBackendError::validation("grade must be K-12"));
    backend.stop().await;
}

#[actix_web::test]
async fn network_failures_are_retried_until_success() {
    let backend = spawn_backend(true).await;

    let health = backend.client(2).health().await.expect("second attempt succeeds");

    assert_eq!(health.version, "2.0.0");
    assert_eq!(backend.seen.flaky_calls.load(Ordering::SeqCst), 2);
    backend.stop().await;
}

#[actix_web::test]
async fn retries_are_bounded() {
    let backend = spawn_backend(false).await;

    let err = backend.client(2).health().await.expect_err("always unavailable");

    assert_eq!(err, StandardsBackendError::network("graph database offline"));
    assert_eq!(backend.seen.flaky_calls.load(Ordering::SeqCst), 3);
    backend.stop().await;
}

#[actix_web::test]
async fn connection_refused_is_network() {
    let config = OntaraClientConfig::new(Url::parse("http://127.0.0.1:9/").expect("valid URL"))
        .with_retries(0, Duration::from_millis(1))
        .with_timeout(Duration::from_secs(2));
    let client = OntaraHttpClient::new(config).expect("client builds");

    let err = client.get_schema().await.expect_err("nothing listens on port 9");

    assert!(err.is_retryable());
}

#[rstest]
#[case(StatusCode::BAD_REQUEST, "Validation")]
#[case(StatusCode::UNPROCESSABLE_ENTITY, "Validation")]
#[case(StatusCode::UNAUTHORIZED, "Auth")]
#[case(StatusCode::FORBIDDEN, "Auth")]
#[case(StatusCode::REQUEST_TIMEOUT, "Network")]
#[case(StatusCode::TOO_MANY_REQUESTS, "Network")]
#[case(StatusCode::BAD_GATEWAY, "Network")]
#[case(StatusCode::GATEWAY_TIMEOUT, "Network")]
#[case(StatusCode::NOT_FOUND, "Backend")]
#[case(StatusCode::INTERNAL_SERVER_ERROR, "Backend")]
fn statuses_map_to_port_errors(#[case] status: StatusCode, #[case] expected: &str) {
    let err = map_status_error(status, b"");
    let actual = match err {
        StandardsBackendError::Validation { .. } => "Validation",
        StandardsBackendError::Auth { .. } => "Auth",
        StandardsBackendError::Network { .. } => "Network",
        StandardsBackendError::Backend { .. } => "Backend",
        StandardsBackendError::Unexpected { .. } => "Unexpected",
    };
    assert_eq!(actual, expected);
}

#[rstest]
#[case(br#"{"message":"Invalid grade"}"#.as_slice(), "Invalid grade")]
#[case(b"upstream   exploded".as_slice(), "status 500: upstream exploded")]
#[case(b"".as_slice(), "status 500")]
fn error_messages_prefer_backend_detail(#[case] body: &[u8], #[case] expected: &str) {
    assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, body), expected);
}

#[test]
fn long_bodies_are_truncated() {
    let body = "x".repeat(200);
    let preview = body_preview(body.as_bytes());
    assert_eq!(preview.chars().count(), PREVIEW_CHAR_LIMIT + 3);
    assert!(preview.ends_with("..."));
}

#[test]
fn ids_are_encoded_as_one_segment() {
    let config = OntaraClientConfig::new(Url::parse("https://ontara.example/v1/").expect("url"));
    let client = OntaraHttpClient::new(config).expect("client builds");

    let url = client
        .endpoint(&["standards", "HSA/SSE 1"])
        .expect("endpoint builds");

    assert_eq!(url.as_str(), "https://ontara.example/v1/standards/HSA%2FSSE%201");
}

#[rstest]
#[case(Duration::from_millis(10), 1, Duration::from_millis(10))]
#[case(Duration::from_millis(10), 3, Duration::from_millis(30))]
#[case(Duration::MAX, 2, Duration::MAX)]
#[case(Duration::from_secs(u64::MAX / 2 + 1), 2, Duration::MAX)]
fn backoff_grows_linearly_and_saturates(
    #[case] base: Duration,
    #[case] attempt: u32,
    #[case] expected: Duration,
) {
    assert_eq!(backoff_delay(base, attempt), expected);
}
