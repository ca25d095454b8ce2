//! Health check endpoint.

use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "2024-01-01T00:00:00.000Z")]
    pub timestamp: String,
    #[schema(example = "1.0.0")]
    pub version: &'static str,
}

/// Health check endpoint - returns server status.
///
/// GET /v1/_health
#[utoipa::path(
    get,
    path = "/v1/_health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION"),
    };

    HttpResponse::Ok().json(response)
}
