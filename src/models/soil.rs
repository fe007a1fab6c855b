use super::ValueRange;
use serde::{Deserialize, Serialize};

labelled_enum! {
    /// Macro-nutrient availability class.
    pub enum NutrientLevel {
        VeryLow => "Very Low",
        Low => "Low",
        Medium => "Medium",
        High => "High",
        VeryHigh => "Very High",
    }
    fallback Unknown
}

labelled_enum! {
    pub enum Drainage {
        Poor => "Poor",
        Moderate => "Moderate",
        Good => "Good",
        Excellent => "Excellent",
    }
    fallback Unknown
}

labelled_enum! {
    pub enum ErosionRisk {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        VeryHigh => "Very High",
    }
    fallback Unknown
}

labelled_enum! {
    pub enum SalinityLevel {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
    fallback Unknown
}

impl NutrientLevel {
    pub fn is_deficient(&self) -> bool {
        matches!(self, NutrientLevel::Low | NutrientLevel::VeryLow)
    }
}

impl ErosionRisk {
    pub fn is_severe(&self) -> bool {
        matches!(self, ErosionRisk::High | ErosionRisk::VeryHigh)
    }
}

/// Nitrogen, phosphorus and potassium levels of a soil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
}

/// Region-scoped soil characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub primary_soil: String,
    pub secondary_soils: Vec<String>,
    pub ph_range: ValueRange,
    /// Percent by weight
    pub organic_matter_pct: f64,
    pub nutrients: NutrientProfile,
    pub drainage: Drainage,
    pub erosion_risk: ErosionRisk,
    pub salinity: SalinityLevel,
    pub soil_depth: String,
    pub water_holding_capacity: String,
    pub texture_class: String,
    /// Cation exchange capacity, meq/100g
    pub cec: f64,
    /// g/cm³
    pub bulk_density: f64,
}
