//! Prediction handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::prediction::{
    FeatureRecord, FieldViolation, ModelRegistry, PredictionError, PredictionResult, ReviewFlag,
};
use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub model: String,
    /// Decoded with [`FeatureRecord::from_value`] so every bad field is reported
    pub features: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub request_id: Uuid,
    pub model: String,
    pub backend_model: &'static str,
    #[serde(flatten)]
    pub result: PredictionResult,
    pub review_flags: Vec<ReviewFlag>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    pub violations: Vec<FieldViolation>,
    pub review_flags: Vec<ReviewFlag>,
}

/// Run one prediction through the inference service
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload?;
    let request_id = Uuid::new_v4();
    let descriptor = ModelRegistry.lookup(&req.model)?;
    let features = FeatureRecord::from_value(&req.features)?;

    tracing::info!("Prediction {} requested with model {}", request_id, descriptor.key);

    let result = state.pipeline.predict(&features, &req.model).await?;

    Ok(Json(PredictResponse {
        request_id,
        model: req.model,
        backend_model: descriptor.backend_id,
        result,
        review_flags: features.review_flags(),
    }))
}

/// Validate a record without contacting the inference service
pub async fn validate(
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ValidateResponse>> {
    let Json(body) = payload?;

    let response = match FeatureRecord::from_value(&body) {
        Ok(record) => {
            let violations = record.violations();
            ValidateResponse {
                valid: violations.is_empty(),
                violations,
                review_flags: record.review_flags(),
            }
        }
        Err(PredictionError::InvalidFeatureRecord { violations }) => ValidateResponse {
            valid: false,
            violations,
            review_flags: Vec::new(),
        },
        Err(e) => return Err(e.into()),
    };

    Ok(Json(response))
}
