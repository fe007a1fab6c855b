use crate::climate::clamp_score;
use crate::models::{
    CropCategory, CropRequirement, Drainage, ErosionRisk, NutrientLevel, SoilProfile, ValueRange,
    WaterRequirement,
};
use serde::Serialize;
use std::fmt;

const PH_WEIGHT: f64 = 0.25;
const WATER_WEIGHT: f64 = 0.30;
const NUTRIENT_WEIGHT: f64 = 0.30;
const EROSION_WEIGHT: f64 = 0.15;

/// Component scores below this trigger an advisory.
const ADVISORY_THRESHOLD: f64 = 6.0;
const EROSION_ADVISORY_THRESHOLD: f64 = 7.0;

/// Letter-style grade of an overall soil score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SuitabilityGrade {
    Unsuitable,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SuitabilityGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.5 {
            SuitabilityGrade::Excellent
        } else if score >= 7.0 {
            SuitabilityGrade::Good
        } else if score >= 5.5 {
            SuitabilityGrade::Fair
        } else if score >= 4.0 {
            SuitabilityGrade::Poor
        } else {
            SuitabilityGrade::Unsuitable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityGrade::Excellent => "Excellent",
            SuitabilityGrade::Good => "Good",
            SuitabilityGrade::Fair => "Fair",
            SuitabilityGrade::Poor => "Poor",
            SuitabilityGrade::Unsuitable => "Unsuitable",
        }
    }
}

impl fmt::Display for SuitabilityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilComponentScores {
    pub ph_compatibility: f64,
    pub water_compatibility: f64,
    pub nutrient_adequacy: f64,
    pub erosion_risk: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientScores {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl NutrientScores {
    pub fn mean(&self) -> f64 {
        (self.nitrogen + self.phosphorus + self.potassium) / 3.0
    }

    fn labelled(&self) -> [(&'static str, f64); 3] {
        [
            ("N", self.nitrogen),
            ("P", self.phosphorus),
            ("K", self.potassium),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilDetail {
    pub soil_ph_range: ValueRange,
    pub crop_ph_requirement: ValueRange,
    pub nutrient_scores: NutrientScores,
    pub water_match: String,
}

/// Outcome of matching one crop against one soil profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilAnalysis {
    pub overall_score: f64,
    pub component_scores: SoilComponentScores,
    pub detailed_analysis: SoilDetail,
    pub recommendations: Vec<String>,
    pub suitability_grade: SuitabilityGrade,
}

/// Target N/P/K ranks a crop category draws on.
struct NutrientNeeds {
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
}

fn nutrient_needs(category: CropCategory) -> NutrientNeeds {
    let (nitrogen, phosphorus, potassium) = match category {
        CropCategory::Cereals => (8.0, 6.0, 7.0),
        // Legumes fix their own nitrogen
        CropCategory::Pulses => (4.0, 8.0, 6.0),
        CropCategory::Oilseeds => (7.0, 8.0, 8.0),
        CropCategory::Vegetables => (9.0, 8.0, 8.0),
        CropCategory::Fruits => (7.0, 7.0, 9.0),
        CropCategory::Other => (7.0, 7.0, 7.0),
    };
    NutrientNeeds {
        nitrogen,
        phosphorus,
        potassium,
    }
}

pub fn nutrient_rank(level: NutrientLevel) -> f64 {
    match level {
        NutrientLevel::VeryLow => 1.0,
        NutrientLevel::Low => 3.0,
        NutrientLevel::Medium => 6.0,
        NutrientLevel::High => 9.0,
        NutrientLevel::VeryHigh => 10.0,
        NutrientLevel::Unknown => 5.0,
    }
}

/// 10 minus twice the distance between soil and crop pH midpoints.
pub fn ph_score(soil_ph: &ValueRange, crop_ph: &ValueRange) -> f64 {
    clamp_score(10.0 - (soil_ph.midpoint() - crop_ph.midpoint()).abs() * 2.0)
}

pub fn water_score(requirement: WaterRequirement, drainage: Drainage) -> f64 {
    use Drainage::*;

    match (requirement, drainage) {
        (WaterRequirement::High, Excellent) => 7.0,
        (WaterRequirement::High, Good) => 9.0,
        (WaterRequirement::High, Moderate) => 6.0,
        (WaterRequirement::High, Poor) => 4.0,
        (WaterRequirement::Medium, Excellent) => 8.0,
        (WaterRequirement::Medium, Good) => 10.0,
        (WaterRequirement::Medium, Moderate) => 8.0,
        (WaterRequirement::Medium, Poor) => 5.0,
        (WaterRequirement::Low, Excellent) => 6.0,
        (WaterRequirement::Low, Good) => 8.0,
        (WaterRequirement::Low, Moderate) => 9.0,
        (WaterRequirement::Low, Poor) => 10.0,
        (WaterRequirement::Unknown, _) | (_, Unknown) => 5.0,
    }
}

pub fn erosion_score(risk: ErosionRisk) -> f64 {
    match risk {
        ErosionRisk::Low => 10.0,
        ErosionRisk::Medium => 7.0,
        ErosionRisk::High => 4.0,
        ErosionRisk::VeryHigh => 2.0,
        ErosionRisk::Unknown => 5.0,
    }
}

pub fn nutrient_scores(category: CropCategory, soil: &SoilProfile) -> NutrientScores {
    let needs = nutrient_needs(category);
    let score = |level: NutrientLevel, need: f64| clamp_score(10.0 - (nutrient_rank(level) - need).abs());

    NutrientScores {
        nitrogen: score(soil.nutrients.nitrogen, needs.nitrogen),
        phosphorus: score(soil.nutrients.phosphorus, needs.phosphorus),
        potassium: score(soil.nutrients.potassium, needs.potassium),
    }
}

/// Score how well `soil` suits `crop` on pH, water, nutrients and erosion.
pub fn score_soil_compatibility(crop: &CropRequirement, soil: &SoilProfile) -> SoilAnalysis {
    let ph = ph_score(&soil.ph_range, &crop.soil_ph);
    let water = water_score(crop.water_requirement, soil.drainage);
    let nutrients = nutrient_scores(crop.category, soil);
    let nutrient = nutrients.mean();
    let erosion = erosion_score(soil.erosion_risk);

    let overall = ph * PH_WEIGHT + water * WATER_WEIGHT + nutrient * NUTRIENT_WEIGHT + erosion * EROSION_WEIGHT;

    let mut recommendations = Vec::new();

    if ph < ADVISORY_THRESHOLD {
        if soil.ph_range.midpoint() > crop.soil_ph.midpoint() {
            recommendations.push("Apply organic matter or sulfur to reduce soil pH".to_string());
        } else {
            recommendations.push("Apply lime to increase soil pH".to_string());
        }
    }

    if water < ADVISORY_THRESHOLD {
        match (crop.water_requirement, soil.drainage) {
            (WaterRequirement::High, Drainage::Poor) => {
                recommendations.push("Improve drainage through better field preparation".to_string())
            }
            (WaterRequirement::Low, Drainage::Excellent) => recommendations
                .push("Consider water conservation techniques or mulching".to_string()),
            _ => {}
        }
    }

    if nutrient < ADVISORY_THRESHOLD {
        let low: Vec<&str> = nutrients
            .labelled()
            .iter()
            .filter(|(_, score)| *score < ADVISORY_THRESHOLD)
            .map(|(label, _)| *label)
            .collect();
        if !low.is_empty() {
            recommendations.push(format!("Apply fertilizers rich in {}", low.join(", ")));
        }
    }

    if erosion < EROSION_ADVISORY_THRESHOLD {
        recommendations.push("Implement erosion control measures like contour farming".to_string());
    }

    SoilAnalysis {
        overall_score: round2(overall),
        component_scores: SoilComponentScores {
            ph_compatibility: round2(ph),
            water_compatibility: round2(water),
            nutrient_adequacy: round2(nutrient),
            erosion_risk: round2(erosion),
        },
        detailed_analysis: SoilDetail {
            soil_ph_range: soil.ph_range,
            crop_ph_requirement: crop.soil_ph,
            nutrient_scores: NutrientScores {
                nitrogen: round2(nutrients.nitrogen),
                phosphorus: round2(nutrients.phosphorus),
                potassium: round2(nutrients.potassium),
            },
            water_match: format!(
                "Crop needs {} water, soil has {} drainage",
                crop.water_requirement, soil.drainage
            ),
        },
        recommendations,
        suitability_grade: SuitabilityGrade::from_score(overall),
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
