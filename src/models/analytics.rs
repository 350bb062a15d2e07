//! Static descriptive datasets shown on the dashboard

use serde::Serialize;

use crate::prediction::ModelRegistry;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalRisk {
    pub zone: &'static str,
    pub avg_risk: f64,
    pub population: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskTrendPoint {
    pub month: &'static str,
    pub risk: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskShare {
    pub category: &'static str,
    /// Percent of households
    pub value: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_households: u32,
    pub avg_risk_score: f64,
    pub high_risk_area_share: f64,
    pub best_model: &'static str,
    pub best_model_accuracy: f64,
}

pub static REGIONAL_RISK: [RegionalRisk; 6] = [
    RegionalRisk { zone: "S-South", avg_risk: 0.78, population: 45000 },
    RegionalRisk { zone: "S-East", avg_risk: 0.65, population: 38000 },
    RegionalRisk { zone: "S-West", avg_risk: 0.58, population: 52000 },
    RegionalRisk { zone: "N-East", avg_risk: 0.72, population: 42000 },
    RegionalRisk { zone: "N-West", avg_risk: 0.68, population: 48000 },
    RegionalRisk { zone: "N-Central", avg_risk: 0.62, population: 35000 },
];

pub static FEATURE_IMPORTANCE: [FeatureImportance; 9] = [
    FeatureImportance { feature: "Avg Rainfall", importance: 0.18 },
    FeatureImportance { feature: "Stagnant Water", importance: 0.15 },
    FeatureImportance { feature: "Net Usage Rate", importance: 0.14 },
    FeatureImportance { feature: "Temperature", importance: 0.12 },
    FeatureImportance { feature: "Children Under 5", importance: 0.11 },
    FeatureImportance { feature: "Distance to Facility", importance: 0.10 },
    FeatureImportance { feature: "Has Nets", importance: 0.09 },
    FeatureImportance { feature: "Urban Rural", importance: 0.07 },
    FeatureImportance { feature: "Household Size", importance: 0.04 },
];

pub static RISK_TRENDS: [RiskTrendPoint; 12] = [
    RiskTrendPoint { month: "Jan", risk: 0.45 },
    RiskTrendPoint { month: "Feb", risk: 0.48 },
    RiskTrendPoint { month: "Mar", risk: 0.52 },
    RiskTrendPoint { month: "Apr", risk: 0.58 },
    RiskTrendPoint { month: "May", risk: 0.65 },
    RiskTrendPoint { month: "Jun", risk: 0.72 },
    RiskTrendPoint { month: "Jul", risk: 0.78 },
    RiskTrendPoint { month: "Aug", risk: 0.75 },
    RiskTrendPoint { month: "Sep", risk: 0.68 },
    RiskTrendPoint { month: "Oct", risk: 0.60 },
    RiskTrendPoint { month: "Nov", risk: 0.52 },
    RiskTrendPoint { month: "Dec", risk: 0.48 },
];

pub static RISK_DISTRIBUTION: [RiskShare; 4] = [
    RiskShare { category: "Low Risk", value: 25, color: "#10b981" },
    RiskShare { category: "Medium Risk", value: 35, color: "#f59e0b" },
    RiskShare { category: "High Risk", value: 28, color: "#ef4444" },
    RiskShare { category: "Critical Risk", value: 12, color: "#7f1d1d" },
];

const TOTAL_HOUSEHOLDS: u32 = 2000;
const AVG_RISK_SCORE: f64 = 0.65;

impl Overview {
    pub fn current(registry: &ModelRegistry) -> Self {
        let best = registry.best();
        let high_risk = RISK_DISTRIBUTION
            .iter()
            .find(|share| share.category == "High Risk")
            .map_or(0, |share| share.value);

        Self {
            total_households: TOTAL_HOUSEHOLDS,
            avg_risk_score: AVG_RISK_SCORE,
            high_risk_area_share: f64::from(high_risk) / 100.0,
            best_model: best.display_name,
            best_model_accuracy: best.metrics.accuracy,
        }
    }
}
