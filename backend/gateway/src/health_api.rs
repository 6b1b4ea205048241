use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /health`
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Leaf Analyzer Backend is running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}
