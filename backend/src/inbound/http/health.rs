//! Liveness probe reporting the gateway and its dependencies.

use actix_web::{HttpResponse, get, web};

use super::cache_control::no_store_header;
use super::schemas::HealthReportSchema;
use super::state::HttpState;

/// Report gateway health. Degraded still answers 200 so load balancers keep
/// routing; unhealthy answers 503.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Healthy or degraded", body = HealthReportSchema),
        (status = 503, description = "Two or more checks failed", body = HealthReportSchema)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let report = state.health.report().await;
    let mut response = if report.status.is_available() {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };

    response.insert_header(no_store_header()).json(report)
}
