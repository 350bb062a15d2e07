//! Configuration module

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Remote inference service settings
    pub inference: InferenceConfig,
}

/// Settings for the remote inference service
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Full URL of the predict endpoint
    pub endpoint: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Confidence attached to a result when the service does not send one.
    /// This is an approximation, not a model output.
    pub default_confidence: f64,
}

pub const DEFAULT_INFERENCE_URL: &str = "http://localhost:5000/predict";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONFIDENCE: f64 = 0.90;

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_INFERENCE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl InferenceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_default_confidence(mut self, confidence: f64) -> Self {
        self.default_confidence = clamp_confidence(confidence);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "auto".to_string()),

            inference: InferenceConfig {
                endpoint: env::var("INFERENCE_URL")
                    .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string()),

                timeout_ms: env::var("INFERENCE_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),

                default_confidence: env::var("DEFAULT_CONFIDENCE")
                    .ok()
                    .and_then(|c| c.parse::<f64>().ok())
                    .map(clamp_confidence)
                    .unwrap_or(DEFAULT_CONFIDENCE),
            },
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if logs should be emitted as JSON. `auto` follows the environment.
    pub fn json_logs(&self) -> bool {
        match self.log_format.to_ascii_lowercase().as_str() {
            "json" => true,
            "auto" => self.is_production(),
            _ => false,
        }
    }
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        DEFAULT_CONFIDENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_defaults() {
        let config = InferenceConfig::default();
        assert_eq!(config.endpoint, DEFAULT_INFERENCE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!((config.default_confidence - 0.90).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_confidence_is_clamped() {
        let config = InferenceConfig::new("http://inference").with_default_confidence(1.7);
        assert_eq!(config.default_confidence, 1.0);

        let config = InferenceConfig::new("http://inference").with_default_confidence(f64::NAN);
        assert_eq!(config.default_confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_log_format() {
        let mut config = Config {
            port: 8080,
            environment: "production".to_string(),
            log_format: "JSON".to_string(),
            inference: InferenceConfig::default(),
        };
        assert!(config.json_logs());
        assert!(config.is_production());

        config.log_format = "pretty".to_string();
        assert!(!config.json_logs());

        config.log_format = "auto".to_string();
        assert!(config.json_logs());

        config.environment = "development".to_string();
        assert!(!config.json_logs());
    }
}
