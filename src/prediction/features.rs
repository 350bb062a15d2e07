//! Household feature record
//!
//! The record the operator edits in the prediction form. Field names match
//! the wire names the inference service expects. Validation reports every
//! violated field at once; review flags mark values that are accepted but
//! look implausible.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::error::{FieldViolation, PredictionError};

/// Geopolitical zones
pub const ZONES: [&str; 6] = [
    "North-Central",
    "North-East",
    "North-West",
    "South-East",
    "South-South",
    "South-West",
];

/// Administrative states with the zone each belongs to
pub const STATES: [(&str, &str); 37] = [
    ("Benue", "North-Central"),
    ("FCT", "North-Central"),
    ("Kogi", "North-Central"),
    ("Kwara", "North-Central"),
    ("Nasarawa", "North-Central"),
    ("Niger", "North-Central"),
    ("Plateau", "North-Central"),
    ("Adamawa", "North-East"),
    ("Bauchi", "North-East"),
    ("Borno", "North-East"),
    ("Gombe", "North-East"),
    ("Taraba", "North-East"),
    ("Yobe", "North-East"),
    ("Jigawa", "North-West"),
    ("Kaduna", "North-West"),
    ("Kano", "North-West"),
    ("Katsina", "North-West"),
    ("Kebbi", "North-West"),
    ("Sokoto", "North-West"),
    ("Zamfara", "North-West"),
    ("Abia", "South-East"),
    ("Anambra", "South-East"),
    ("Ebonyi", "South-East"),
    ("Enugu", "South-East"),
    ("Imo", "South-East"),
    ("Akwa Ibom", "South-South"),
    ("Bayelsa", "South-South"),
    ("Cross River", "South-South"),
    ("Delta", "South-South"),
    ("Edo", "South-South"),
    ("Rivers", "South-South"),
    ("Ekiti", "South-West"),
    ("Lagos", "South-West"),
    ("Ogun", "South-West"),
    ("Ondo", "South-West"),
    ("Osun", "South-West"),
    ("Oyo", "South-West"),
];

/// Plausible average temperature range in °C
pub const PLAUSIBLE_TEMPERATURE_C: (f64, f64) = (0.0, 50.0);

/// Zone a state belongs to, if the state is known
pub fn zone_of(state: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, zone)| *zone)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrbanRural {
    Urban,
    Rural,
}

impl UrbanRural {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrbanRural::Urban => "urban",
            UrbanRural::Rural => "rural",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FeatureRecord {
    pub state: String,

    pub zone: String,

    pub urban_rural: UrbanRural,

    #[validate(range(min = 0, message = "must be zero or greater"))]
    pub household_size: i64,

    #[validate(range(min = 0, message = "must be zero or greater"))]
    pub num_children_under5: i64,

    #[serde(deserialize_with = "flag")]
    pub has_mosquito_nets: bool,

    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0 and 1"))]
    pub net_usage_rate: f64,

    #[serde(deserialize_with = "flag")]
    pub stagnant_water_nearby: bool,

    #[validate(range(min = 0.0, message = "must be zero or greater"))]
    pub distance_to_health_facility_km: f64,

    #[validate(range(min = 0.0, message = "must be zero or greater"))]
    pub avg_annual_rainfall_mm: f64,

    pub avg_temperature_celsius: f64,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            state: "Lagos".to_string(),
            zone: "South-West".to_string(),
            urban_rural: UrbanRural::Urban,
            household_size: 5,
            num_children_under5: 2,
            has_mosquito_nets: true,
            net_usage_rate: 0.8,
            stagnant_water_nearby: false,
            distance_to_health_facility_km: 5.0,
            avg_annual_rainfall_mm: 1500.0,
            avg_temperature_celsius: 28.0,
        }
    }
}

/// Accepted value that should be looked at by a person
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewFlag {
    TemperatureOutOfRange { value: f64 },
    ZoneMismatch { state: String, expected_zone: String, zone: String },
}

impl FeatureRecord {
    /// Decode a record from untrusted JSON field by field.
    ///
    /// Fields that cannot be decoded are reported together with the range
    /// and membership violations of the fields that could, so one response
    /// lists every problem. An `Ok` record decoded cleanly but has not been
    /// range checked.
    pub fn from_value(value: &Value) -> Result<Self, PredictionError> {
        let Some(object) = value.as_object() else {
            return Err(PredictionError::InvalidFeatureRecord {
                violations: vec![FieldViolation::new("features", "must be a JSON object")],
            });
        };

        let defaults = FeatureRecord::default();
        let mut decoder = FieldDecoder { object, violations: Vec::new() };

        let record = FeatureRecord {
            state: decoder.field("state", defaults.state),
            zone: decoder.field("zone", defaults.zone),
            urban_rural: decoder.field("urban_rural", defaults.urban_rural),
            household_size: decoder.field("household_size", defaults.household_size),
            num_children_under5: decoder.field("num_children_under5", defaults.num_children_under5),
            has_mosquito_nets: decoder.flag("has_mosquito_nets", defaults.has_mosquito_nets),
            net_usage_rate: decoder.field("net_usage_rate", defaults.net_usage_rate),
            stagnant_water_nearby: decoder.flag("stagnant_water_nearby", defaults.stagnant_water_nearby),
            distance_to_health_facility_km: decoder
                .field("distance_to_health_facility_km", defaults.distance_to_health_facility_km),
            avg_annual_rainfall_mm: decoder.field("avg_annual_rainfall_mm", defaults.avg_annual_rainfall_mm),
            avg_temperature_celsius: decoder
                .field("avg_temperature_celsius", defaults.avg_temperature_celsius),
        };

        let mut violations = decoder.violations;
        if violations.is_empty() {
            return Ok(record);
        }

        // Placeholders stand in for undecoded fields; skip anything they touch.
        let undecoded: Vec<String> = violations.iter().map(|v| v.field.clone()).collect();
        let household_undecoded = undecoded.iter().any(|f| f == "household_size");
        violations.extend(record.violations().into_iter().filter(|v| {
            !undecoded.contains(&v.field)
                && !(household_undecoded && v.message == CHILDREN_EXCEED_HOUSEHOLD)
        }));

        violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        Err(PredictionError::InvalidFeatureRecord { violations })
    }

    /// Every violated field, sorted by field name. Empty when valid.
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();

        if let Err(errors) = self.validate() {
            for (field, errs) in errors.field_errors() {
                for err in errs.iter() {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(FieldViolation::new(field.to_string(), message));
                }
            }
        }

        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                out.push(FieldViolation::new(field, "must be a finite number"));
            }
        }

        if zone_of(&self.state).is_none() {
            out.push(FieldViolation::new(
                "state",
                format!("unknown state '{}'", self.state),
            ));
        }

        if !ZONES.contains(&self.zone.as_str()) {
            out.push(FieldViolation::new(
                "zone",
                format!("unknown zone '{}'", self.zone),
            ));
        }

        if self.num_children_under5 > self.household_size {
            out.push(FieldViolation::new(
                "num_children_under5",
                CHILDREN_EXCEED_HOUSEHOLD,
            ));
        }

        out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        out.dedup();
        out
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// Values that pass validation but are flagged for review
    pub fn review_flags(&self) -> Vec<ReviewFlag> {
        let mut flags = Vec::new();

        let (low, high) = PLAUSIBLE_TEMPERATURE_C;
        let temp = self.avg_temperature_celsius;
        if temp.is_finite() && !(low..=high).contains(&temp) {
            flags.push(ReviewFlag::TemperatureOutOfRange { value: temp });
        }

        if let Some(expected) = zone_of(&self.state) {
            if ZONES.contains(&self.zone.as_str()) && expected != self.zone {
                flags.push(ReviewFlag::ZoneMismatch {
                    state: self.state.clone(),
                    expected_zone: expected.to_string(),
                    zone: self.zone.clone(),
                });
            }
        }

        flags
    }

    fn float_fields(&self) -> [(&'static str, f64); 4] {
        [
            ("net_usage_rate", self.net_usage_rate),
            ("distance_to_health_facility_km", self.distance_to_health_facility_km),
            ("avg_annual_rainfall_mm", self.avg_annual_rainfall_mm),
            ("avg_temperature_celsius", self.avg_temperature_celsius),
        ]
    }
}

const CHILDREN_EXCEED_HOUSEHOLD: &str = "must not exceed household_size";

struct FieldDecoder<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl FieldDecoder<'_> {
    fn field<T: DeserializeOwned>(&mut self, name: &'static str, placeholder: T) -> T {
        self.decode(name, placeholder, |value| T::deserialize(value))
    }

    fn flag(&mut self, name: &'static str, placeholder: bool) -> bool {
        self.decode(name, placeholder, |value| flag(value))
    }

    fn decode<T>(
        &mut self,
        name: &'static str,
        placeholder: T,
        decode: impl FnOnce(&Value) -> Result<T, serde_json::Error>,
    ) -> T {
        let Some(value) = self.object.get(name) else {
            self.violations.push(FieldViolation::new(name, "is required"));
            return placeholder;
        };

        match decode(value) {
            Ok(decoded) => decoded,
            Err(e) => {
                self.violations.push(FieldViolation::new(name, e.to_string()));
                placeholder
            }
        }
    }
}

/// The dashboard sends 0/1 for yes/no selects; accept plain booleans too.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(serde::de::Error::custom(format!(
            "expected 0 or 1, got {}",
            other
        ))),
    }
}
