//! Inference API Client
//!
//! HTTP client for the remote risk model. One request per call, no retries;
//! a timeout is reported the same way as a failing status.

use serde::Serialize;
use serde_json::Value;

use super::classifier::{classify, RiskLevel};
use super::error::PredictionError;
use super::request::RequestPayload;
use crate::config::InferenceConfig;

/// Outcome of one successful inference call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}

/// Inference service client
#[derive(Debug, Clone)]
pub struct InferenceClient {
    endpoint: String,
    default_confidence: f64,
    http_client: reqwest::Client,
}

impl InferenceClient {
    /// Create new inference client
    pub fn new(config: &InferenceConfig) -> Result<Self, PredictionError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PredictionError::Configuration(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            default_confidence: config.default_confidence,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one payload and classify the returned score
    pub async fn predict(&self, payload: &RequestPayload) -> Result<PredictionResult, PredictionError> {
        let response = self.http_client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Inference request failed: {}", e);
                PredictionError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Inference service returned {}: {}", status.as_u16(), error_text);
            return Err(PredictionError::status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(PredictionError::from)?;
        let result = parse_response(&body, self.default_confidence)?;

        tracing::info!(
            model = payload.model,
            score = result.risk_score,
            level = %result.risk_level,
            "Prediction received"
        );

        Ok(result)
    }
}

/// Turn a 2xx body into a result.
///
/// `riskScore` is required. `confidence` and `recommendations` are optional;
/// when present they must have the right shape.
pub fn parse_response(body: &[u8], default_confidence: f64) -> Result<PredictionResult, PredictionError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictionError::MalformedResponse(format!("body is not JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| PredictionError::MalformedResponse("body is not a JSON object".to_string()))?;

    let raw_score = object
        .get("riskScore")
        .and_then(Value::as_f64)
        .ok_or_else(|| PredictionError::MalformedResponse("missing numeric riskScore".to_string()))?;

    let risk_score = raw_score.clamp(0.0, 1.0);
    if risk_score != raw_score {
        tracing::warn!(raw_score, "Risk score outside [0, 1], clamped");
    }

    let confidence = match object.get("confidence") {
        None | Some(Value::Null) => default_confidence,
        Some(v) => v
            .as_f64()
            .filter(|c| (0.0..=1.0).contains(c))
            .ok_or_else(|| {
                PredictionError::MalformedResponse("confidence must be a number in [0, 1]".to_string())
            })?,
    };

    let recommendations = match object.get("recommendations") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                PredictionError::MalformedResponse("recommendations must be strings".to_string())
            })?,
        Some(_) => {
            return Err(PredictionError::MalformedResponse(
                "recommendations must be an array".to_string(),
            ))
        }
    };

    if let Some(model) = object.get("model").and_then(Value::as_str) {
        tracing::debug!(model, "Inference service echoed model");
    }

    Ok(PredictionResult {
        risk_score,
        risk_level: classify(risk_score),
        confidence,
        recommendations,
    })
}
