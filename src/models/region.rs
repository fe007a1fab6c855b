use super::ValueRange;
use serde::{Deserialize, Serialize};

/// Descriptor of an agricultural region.
///
/// Scoring only reads `name` and `climate_zone`; the rest is descriptive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub climate_zone: String,
    pub soil_type: String,
    /// mm per year
    pub annual_rainfall: f64,
    /// °C
    pub temperature_range: ValueRange,
    pub agricultural_zone: String,
    #[serde(default)]
    pub major_crops: Vec<String>,
}

impl RegionProfile {
    /// Region known only by name and climate zone.
    pub fn minimal(name: impl Into<String>, climate_zone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: 0.0,
            longitude: 0.0,
            climate_zone: climate_zone.into(),
            soil_type: String::new(),
            annual_rainfall: 0.0,
            temperature_range: ValueRange::new(0.0, 0.0),
            agricultural_zone: String::new(),
            major_crops: Vec::new(),
        }
    }
}
