use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Health check endpoint response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
///
/// Liveness probe; requires no token and touches no store.
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    };

    (StatusCode::OK, Json(response))
}
