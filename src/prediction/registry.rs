//! Model registry
//!
//! Static catalog of the models an operator can pick. The UI taxonomy and
//! the inference service's taxonomy differ, so every UI key carries the
//! backend identifier the service expects.

use serde::{Deserialize, Serialize};

use super::error::PredictionError;

/// Model keys as presented by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKey {
    #[default]
    RandomForest,
    GradientBoosting,
    NeuralNetwork,
}

impl ModelKey {
    pub const ALL: [ModelKey; 3] = [
        ModelKey::RandomForest,
        ModelKey::GradientBoosting,
        ModelKey::NeuralNetwork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKey::RandomForest => "random_forest",
            ModelKey::GradientBoosting => "gradient_boosting",
            ModelKey::NeuralNetwork => "neural_network",
        }
    }

    /// Wire identifier used by the inference service
    pub fn backend_id(&self) -> &'static str {
        match self {
            ModelKey::RandomForest => "random_forest",
            ModelKey::GradientBoosting => "xgboost",
            ModelKey::NeuralNetwork => "neural_net",
        }
    }

    pub fn descriptor(&self) -> &'static ModelDescriptor {
        match self {
            ModelKey::RandomForest => &MODELS[0],
            ModelKey::GradientBoosting => &MODELS[1],
            ModelKey::NeuralNetwork => &MODELS[2],
        }
    }
}

impl std::str::FromStr for ModelKey {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| PredictionError::UnknownModel(s.to_string()))
    }
}

impl std::fmt::Display for ModelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Published evaluation metrics, all in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub auc_roc: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    pub key: ModelKey,
    pub display_name: &'static str,
    pub backend_id: &'static str,
    pub metrics: ModelMetrics,
}

static MODELS: [ModelDescriptor; 3] = [
    ModelDescriptor {
        key: ModelKey::RandomForest,
        display_name: "Random Forest",
        backend_id: "random_forest",
        metrics: ModelMetrics {
            accuracy: 0.89,
            precision: 0.87,
            recall: 0.91,
            f1_score: 0.89,
            auc_roc: 0.94,
        },
    },
    ModelDescriptor {
        key: ModelKey::GradientBoosting,
        display_name: "Gradient Boosting",
        backend_id: "xgboost",
        metrics: ModelMetrics {
            accuracy: 0.91,
            precision: 0.89,
            recall: 0.93,
            f1_score: 0.91,
            auc_roc: 0.95,
        },
    },
    ModelDescriptor {
        key: ModelKey::NeuralNetwork,
        display_name: "Neural Network",
        backend_id: "neural_net",
        metrics: ModelMetrics {
            accuracy: 0.88,
            precision: 0.86,
            recall: 0.90,
            f1_score: 0.88,
            auc_roc: 0.93,
        },
    },
];

/// Read-only, process-wide view over the model catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelRegistry;

impl ModelRegistry {
    /// Look up a model by its UI key
    pub fn lookup(&self, ui_model_key: &str) -> Result<&'static ModelDescriptor, PredictionError> {
        let key: ModelKey = ui_model_key.parse()?;
        Ok(key.descriptor())
    }

    /// Backend identifier for a UI key
    pub fn backend_id_for(&self, ui_model_key: &str) -> Result<&'static str, PredictionError> {
        self.lookup(ui_model_key).map(|m| m.backend_id)
    }

    /// Models ranked by AUC-ROC, ties broken by F1
    pub fn leaderboard(&self) -> Vec<&'static ModelDescriptor> {
        let mut ranked: Vec<_> = MODELS.iter().collect();
        ranked.sort_by(|a, b| {
            b.metrics
                .auc_roc
                .total_cmp(&a.metrics.auc_roc)
                .then(b.metrics.f1_score.total_cmp(&a.metrics.f1_score))
        });
        ranked
    }

    pub fn best(&self) -> &'static ModelDescriptor {
        self.leaderboard()[0]
    }
}
