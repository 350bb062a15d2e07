//! Risk classification
//!
//! Maps a risk score to one of four buckets. Thresholds ascend and each
//! bucket is closed on the left, open on the right:
//!
//! | score          | level    |
//! |----------------|----------|
//! | `< 0.3`        | Low      |
//! | `[0.3, 0.5)`   | Medium   |
//! | `[0.5, 0.7)`   | High     |
//! | `>= 0.7`       | Critical |

use serde::{Deserialize, Serialize};

pub const MEDIUM_THRESHOLD: f64 = 0.3;
pub const HIGH_THRESHOLD: f64 = 0.5;
pub const CRITICAL_THRESHOLD: f64 = 0.7;

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a risk score.
///
/// Scores outside `[0, 1]` are clamped first; NaN is treated as 0.
pub fn classify(score: f64) -> RiskLevel {
    let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };

    if score >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
