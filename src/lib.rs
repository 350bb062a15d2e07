//! Malaria Risk Prediction Gateway
//!
//! Backend for the malaria risk dashboard. Validates household features,
//! forwards them to the remote risk model and classifies the returned score.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  MALARIA RISK GATEWAY                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────────┐  ┌────────────────────┐ │
//! │  │  API      │  │  Prediction    │  │  Static analytics  │ │
//! │  │  (Axum)   │─▶│  pipeline      │  │  & model catalog   │ │
//! │  └───────────┘  └───────┬────────┘  └────────────────────┘ │
//! │                         ▼                                   │
//! │                ┌─────────────────┐                         │
//! │                │ Inference svc   │                         │
//! │                └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod prediction;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use prediction::{PredictionError, PredictionPipeline};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Self, PredictionError> {
        let pipeline = PredictionPipeline::new(&config.inference)?;
        Ok(Self {
            pipeline: Arc::new(pipeline),
            config,
        })
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let prediction_routes = Router::new()
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/features/validate", post(handlers::predict::validate));

    let catalog_routes = Router::new()
        .route("/api/v1/models", get(handlers::models::list))
        .route("/api/v1/models/:key", get(handlers::models::get))
        .route("/api/v1/analytics/overview", get(handlers::analytics::overview))
        .route("/api/v1/analytics/regional-risk", get(handlers::analytics::regional_risk))
        .route("/api/v1/analytics/feature-importance", get(handlers::analytics::feature_importance))
        .route("/api/v1/analytics/risk-trends", get(handlers::analytics::risk_trends))
        .route("/api/v1/analytics/risk-distribution", get(handlers::analytics::risk_distribution));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(prediction_routes)
        .merge(catalog_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
