//! Prediction pipeline errors

use serde::Serialize;
use thiserror::Error;

/// One violated field of a feature record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PredictionError {
    /// Local validation failed; nothing was sent over the wire.
    #[error("invalid feature record: {}", field_list(.violations))]
    InvalidFeatureRecord { violations: Vec<FieldViolation> },

    /// The model key is not registered.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// Non-2xx status, transport failure or timeout from the inference service.
    #[error("inference service error: {message}")]
    InferenceService {
        status_code: Option<u16>,
        timeout: bool,
        message: String,
    },

    /// The service answered 2xx but the body broke the response contract.
    #[error("malformed inference response: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PredictionError {
    pub fn status(status_code: u16) -> Self {
        Self::InferenceService {
            status_code: Some(status_code),
            timeout: false,
            message: format!("service responded with status {}", status_code),
        }
    }

    pub fn timeout() -> Self {
        Self::InferenceService {
            status_code: None,
            timeout: true,
            message: "request timed out".to_string(),
        }
    }

    /// Field names attached to an `InvalidFeatureRecord`, empty otherwise.
    pub fn violated_fields(&self) -> Vec<&str> {
        match self {
            Self::InvalidFeatureRecord { violations } => {
                violations.iter().map(|v| v.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Raised before any network call was made
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidFeatureRecord { .. } | Self::UnknownModel(_) | Self::Configuration(_)
        )
    }
}

impl From<reqwest::Error> for PredictionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout();
        }
        Self::InferenceService {
            status_code: err.status().map(|s| s.as_u16()),
            timeout: false,
            message: err.to_string(),
        }
    }
}

fn field_list(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
