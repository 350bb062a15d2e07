//! Request payload builder

use serde::Serialize;

use super::error::PredictionError;
use super::features::FeatureRecord;
use super::registry::ModelRegistry;

/// Body POSTed to the inference service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    pub model: &'static str,
    pub state: String,
    pub zone: String,
    pub urban_rural: &'static str,
    pub household_size: i64,
    pub num_children_under5: i64,
    pub has_mosquito_nets: u8,
    pub net_usage_rate: f64,
    pub stagnant_water_nearby: u8,
    pub distance_to_health_facility_km: f64,
    pub avg_annual_rainfall_mm: f64,
    pub avg_temperature_celsius: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder {
    registry: ModelRegistry,
}

impl RequestBuilder {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    /// Validate `record` and merge it with the backend id of `ui_model_key`.
    ///
    /// The model key is resolved first; an unknown key is reported even when
    /// the record is also invalid.
    pub fn build(
        &self,
        record: &FeatureRecord,
        ui_model_key: &str,
    ) -> Result<RequestPayload, PredictionError> {
        let model = self.registry.backend_id_for(ui_model_key)?;

        let violations = record.violations();
        if !violations.is_empty() {
            return Err(PredictionError::InvalidFeatureRecord { violations });
        }

        for flag in record.review_flags() {
            tracing::warn!(?flag, "Feature record flagged for review");
        }

        tracing::debug!(model, state = %record.state, "Built inference payload");

        Ok(RequestPayload {
            model,
            state: record.state.clone(),
            zone: record.zone.clone(),
            urban_rural: record.urban_rural.as_str(),
            household_size: record.household_size,
            num_children_under5: record.num_children_under5,
            has_mosquito_nets: u8::from(record.has_mosquito_nets),
            net_usage_rate: record.net_usage_rate,
            stagnant_water_nearby: u8::from(record.stagnant_water_nearby),
            distance_to_health_facility_km: record.distance_to_health_facility_km,
            avg_annual_rainfall_mm: record.avg_annual_rainfall_mm,
            avg_temperature_celsius: record.avg_temperature_celsius,
        })
    }
}
