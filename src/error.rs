//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::prediction::{FieldViolation, PredictionError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Resource errors
    NotFound(String),

    // Validation errors
    ValidationError(String),
    InvalidFeatures(Vec<FieldViolation>),

    // External service errors
    ExternalServiceError(String),
    ExternalServiceTimeout,

    // Generic errors
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFeatures(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::ExternalServiceTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            AppError::NotFound(msg) => msg.as_str(),
            AppError::ValidationError(msg) => msg.as_str(),
            AppError::InvalidFeatures(_) => "Invalid feature record",
            AppError::ExternalServiceError(msg) => {
                tracing::error!("External service error: {}", msg);
                "Inference service error"
            }
            AppError::ExternalServiceTimeout => {
                tracing::error!("External service timed out");
                "Inference service timed out"
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error"
            }
        };

        let body = match &self {
            AppError::InvalidFeatures(violations) => json!({
                "error": error_message,
                "status": status.as_u16(),
                "violations": violations,
            }),
            _ => json!({
                "error": error_message,
                "status": status.as_u16()
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::InvalidFeatureRecord { violations } => AppError::InvalidFeatures(violations),
            PredictionError::UnknownModel(key) => AppError::NotFound(format!("Unknown model: {}", key)),
            PredictionError::InferenceService { timeout: true, .. } => AppError::ExternalServiceTimeout,
            err @ PredictionError::InferenceService { .. } => AppError::ExternalServiceError(err.to_string()),
            err @ PredictionError::MalformedResponse(_) => AppError::ExternalServiceError(err.to_string()),
            PredictionError::Configuration(msg) => AppError::InternalError(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_error_mapping() {
        let cases = [
            (
                PredictionError::InvalidFeatureRecord { violations: vec![FieldViolation::new("zone", "unknown zone")] },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (PredictionError::UnknownModel("svm".into()), StatusCode::NOT_FOUND),
            (PredictionError::status(500), StatusCode::BAD_GATEWAY),
            (PredictionError::timeout(), StatusCode::GATEWAY_TIMEOUT),
            (PredictionError::MalformedResponse("missing numeric riskScore".into()), StatusCode::BAD_GATEWAY),
            (PredictionError::Configuration("tls".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn test_response_status() {
        let response = AppError::NotFound("Unknown model: svm".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
