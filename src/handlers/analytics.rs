//! Analytics handlers

use axum::Json;

use crate::models::{
    FeatureImportance, Overview, RegionalRisk, RiskShare, RiskTrendPoint,
    FEATURE_IMPORTANCE, REGIONAL_RISK, RISK_DISTRIBUTION, RISK_TRENDS,
};
use crate::prediction::ModelRegistry;

pub async fn overview() -> Json<Overview> {
    Json(Overview::current(&ModelRegistry))
}

pub async fn regional_risk() -> Json<&'static [RegionalRisk]> {
    Json(&REGIONAL_RISK[..])
}

pub async fn feature_importance() -> Json<&'static [FeatureImportance]> {
    Json(&FEATURE_IMPORTANCE[..])
}

pub async fn risk_trends() -> Json<&'static [RiskTrendPoint]> {
    Json(&RISK_TRENDS[..])
}

pub async fn risk_distribution() -> Json<&'static [RiskShare]> {
    Json(&RISK_DISTRIBUTION[..])
}
