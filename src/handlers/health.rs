//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    inference_endpoint: String,
    timestamp: i64,
}

/// Liveness only; the inference service is not contacted
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        inference_endpoint: state.pipeline.client().endpoint().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
