//! Prediction pipeline
//!
//! ```text
//! FeatureRecord + model key
//!        │
//!        ▼
//!  RequestBuilder ── ModelRegistry (UI key → backend id)
//!        │  RequestPayload
//!        ▼
//!  InferenceClient ── POST ──► inference service
//!        │  riskScore
//!        ▼
//!  RiskClassifier ──► PredictionResult
//! ```
//!
//! Validation and model lookup fail before any network call.

pub mod classifier;
pub mod client;
pub mod error;
pub mod features;
pub mod registry;
pub mod request;
pub mod session;

pub use classifier::{classify, RiskLevel};
pub use client::{InferenceClient, PredictionResult};
pub use error::{FieldViolation, PredictionError};
pub use features::{FeatureRecord, ReviewFlag, UrbanRural};
pub use registry::{ModelDescriptor, ModelKey, ModelMetrics, ModelRegistry};
pub use request::{RequestBuilder, RequestPayload};
pub use session::{Completion, DashboardState, PredictionTracker, Tab, Ticket};

use crate::config::InferenceConfig;

/// Builder and client wired together. Holds no per-call state, so one
/// instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct PredictionPipeline {
    builder: RequestBuilder,
    client: InferenceClient,
}

impl PredictionPipeline {
    pub fn new(config: &InferenceConfig) -> Result<Self, PredictionError> {
        Ok(Self {
            builder: RequestBuilder::new(ModelRegistry),
            client: InferenceClient::new(config)?,
        })
    }

    pub fn client(&self) -> &InferenceClient {
        &self.client
    }

    pub async fn predict(
        &self,
        record: &FeatureRecord,
        ui_model_key: &str,
    ) -> Result<PredictionResult, PredictionError> {
        let payload = self.builder.build(record, ui_model_key)?;
        self.client.predict(&payload).await
    }
}
