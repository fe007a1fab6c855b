use crate::models::{
    Drainage, ErosionRisk, NutrientLevel, NutrientProfile, SalinityLevel, SoilProfile, ValueRange,
};
use std::collections::HashMap;

/// Region name → soil profile lookup.
#[derive(Debug, Clone, Default)]
pub struct SoilDatabase {
    profiles: HashMap<String, SoilProfile>,
}

impl SoilDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Soil profiles of the built-in Indian regions.
    pub fn builtin() -> Self {
        builtin_profiles().into_iter().collect()
    }

    pub fn insert(&mut self, region: impl Into<String>, profile: SoilProfile) {
        self.profiles.insert(region.into(), profile);
    }

    pub fn get(&self, region: &str) -> Option<&SoilProfile> {
        self.profiles.get(region)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Region names with a profile, sorted.
    pub fn regions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<(String, SoilProfile)> for SoilDatabase {
    fn from_iter<I: IntoIterator<Item = (String, SoilProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn profile(
    primary_soil: &str,
    secondary_soils: [&str; 2],
    ph_range: (f64, f64),
    organic_matter_pct: f64,
    npk: [NutrientLevel; 3],
    drainage: Drainage,
    erosion_risk: ErosionRisk,
    salinity: SalinityLevel,
    soil_depth: &str,
    water_holding_capacity: &str,
    texture_class: &str,
    cec: f64,
    bulk_density: f64,
) -> SoilProfile {
    SoilProfile {
        primary_soil: primary_soil.to_string(),
        secondary_soils: secondary_soils.iter().map(|s| s.to_string()).collect(),
        ph_range: ValueRange::new(ph_range.0, ph_range.1),
        organic_matter_pct,
        nutrients: NutrientProfile {
            nitrogen: npk[0],
            phosphorus: npk[1],
            potassium: npk[2],
        },
        drainage,
        erosion_risk,
        salinity,
        soil_depth: soil_depth.to_string(),
        water_holding_capacity: water_holding_capacity.to_string(),
        texture_class: texture_class.to_string(),
        cec,
        bulk_density,
    }
}

fn builtin_profiles() -> Vec<(String, SoilProfile)> {
    use NutrientLevel as N;

    vec![
        (
            "Punjab".to_string(),
            profile(
                "Alluvial",
                ["Sandy Loam", "Clay Loam"],
                (6.8, 7.5),
                0.8,
                [N::Medium, N::High, N::High],
                Drainage::Good,
                ErosionRisk::Low,
                SalinityLevel::Low,
                "Deep",
                "High",
                "Loamy",
                25.5,
                1.35,
            ),
        ),
        (
            "Maharashtra".to_string(),
            profile(
                "Black Cotton",
                ["Red Soil", "Laterite"],
                (7.2, 8.3),
                0.6,
                [N::Low, N::Medium, N::High],
                Drainage::Poor,
                ErosionRisk::Medium,
                SalinityLevel::Low,
                "Deep",
                "Very High",
                "Clay",
                35.2,
                1.55,
            ),
        ),
        (
            "Tamil Nadu".to_string(),
            profile(
                "Red Sandy",
                ["Black Soil", "Alluvial"],
                (6.0, 7.2),
                0.5,
                [N::Low, N::Low, N::Medium],
                Drainage::Excellent,
                ErosionRisk::High,
                SalinityLevel::Medium,
                "Medium",
                "Low",
                "Sandy",
                15.8,
                1.45,
            ),
        ),
        (
            "Uttar Pradesh".to_string(),
            profile(
                "Alluvial",
                ["Sandy", "Clay Loam"],
                (6.5, 7.8),
                0.7,
                [N::Medium, N::Medium, N::High],
                Drainage::Good,
                ErosionRisk::Low,
                SalinityLevel::Medium,
                "Deep",
                "High",
                "Loamy",
                22.1,
                1.40,
            ),
        ),
        (
            "Karnataka".to_string(),
            profile(
                "Red Laterite",
                ["Black Soil", "Alluvial"],
                (5.5, 6.8),
                0.4,
                [N::Low, N::Low, N::Low],
                Drainage::Good,
                ErosionRisk::Medium,
                SalinityLevel::Low,
                "Medium",
                "Medium",
                "Sandy Clay",
                18.7,
                1.50,
            ),
        ),
        (
            "Gujarat".to_string(),
            profile(
                "Black Cotton",
                ["Alluvial", "Sandy"],
                (7.5, 8.5),
                0.5,
                [N::Medium, N::Medium, N::High],
                Drainage::Poor,
                ErosionRisk::Low,
                SalinityLevel::High,
                "Deep",
                "High",
                "Clay",
                32.8,
                1.60,
            ),
        ),
        (
            "Rajasthan".to_string(),
            profile(
                "Sandy Desert",
                ["Alluvial", "Red Soil"],
                (7.8, 8.8),
                0.2,
                [N::VeryLow, N::Low, N::Low],
                Drainage::Excellent,
                ErosionRisk::VeryHigh,
                SalinityLevel::High,
                "Shallow",
                "Very Low",
                "Sand",
                8.5,
                1.65,
            ),
        ),
        (
            "West Bengal".to_string(),
            profile(
                "Alluvial",
                ["Laterite", "Peat"],
                (5.8, 7.0),
                1.2,
                [N::High, N::Medium, N::Medium],
                Drainage::Poor,
                ErosionRisk::Medium,
                SalinityLevel::Low,
                "Deep",
                "High",
                "Clay Loam",
                28.3,
                1.30,
            ),
        ),
        (
            "Andhra Pradesh".to_string(),
            profile(
                "Red Sandy",
                ["Black Soil", "Alluvial"],
                (6.2, 7.5),
                0.3,
                [N::Low, N::Low, N::Medium],
                Drainage::Good,
                ErosionRisk::High,
                SalinityLevel::Medium,
                "Medium",
                "Medium",
                "Sandy Clay",
                16.9,
                1.48,
            ),
        ),
        (
            "Madhya Pradesh".to_string(),
            profile(
                "Black Cotton",
                ["Red Soil", "Alluvial"],
                (7.0, 8.2),
                0.6,
                [N::Medium, N::Medium, N::High],
                Drainage::Moderate,
                ErosionRisk::Medium,
                SalinityLevel::Low,
                "Deep",
                "High",
                "Clay",
                30.1,
                1.52,
            ),
        ),
    ]
}
