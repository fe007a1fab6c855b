//! Component scores of the recommendation composite.
//!
//! Every function here is pure and returns a value in `[0, 10]`.

use crate::climate::clamp_score;
use crate::models::{CropCategory, CropEconomics, CropRequirement, RegionProfile, WaterRequirement, WeatherSummary};
use crate::soil::round2;
use serde::Serialize;
use std::collections::HashMap;

pub const CLIMATE_WEIGHT: f64 = 0.25;
pub const SOIL_WEIGHT: f64 = 0.25;
pub const ECONOMIC_WEIGHT: f64 = 0.20;
pub const REGIONAL_WEIGHT: f64 = 0.12;
pub const MARKET_WEIGHT: f64 = 0.10;
pub const RISK_WEIGHT: f64 = 0.08;

pub const MARKET_DEFAULT: f64 = 6.0;

const AFFINITY_SCORE: f64 = 8.0;
const STAPLE_ZONE_SCORE: f64 = 6.0;
const NEUTRAL_REGIONAL_SCORE: f64 = 5.0;

/// Climate zones where cereals and pulses get the staple bonus. Matched exactly.
const STAPLE_ZONES: [&str; 2] = ["Subtropical", "Tropical"];

fn default_market_demand(category: CropCategory) -> f64 {
    match category {
        CropCategory::Cereals => 7.0,
        CropCategory::Pulses => 9.0,
        CropCategory::Oilseeds => 8.0,
        CropCategory::Vegetables => 8.5,
        CropCategory::Fruits => 7.5,
        CropCategory::Other => MARKET_DEFAULT,
    }
}

const DEFAULT_AFFINITY: &[(&str, &[&str])] = &[
    ("Rice (Basmati)", &["Punjab", "Haryana", "Uttar Pradesh"]),
    ("Wheat", &["Punjab", "Haryana", "Uttar Pradesh", "Madhya Pradesh"]),
    ("Cotton", &["Gujarat", "Maharashtra", "Andhra Pradesh", "Punjab"]),
    ("Sugarcane", &["Uttar Pradesh", "Maharashtra", "Karnataka"]),
    ("Soybean", &["Madhya Pradesh", "Maharashtra", "Rajasthan"]),
    ("Sunflower", &["Karnataka", "Andhra Pradesh", "Maharashtra"]),
    ("Chana (Chickpea)", &["Madhya Pradesh", "Rajasthan", "Maharashtra"]),
    ("Tomato", &["Karnataka", "Andhra Pradesh", "Maharashtra"]),
    ("Onion", &["Maharashtra", "Karnataka", "Gujarat"]),
    ("Chili", &["Andhra Pradesh", "Karnataka", "Tamil Nadu"]),
];

/// Market-demand and regional-affinity lookup data.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTables {
    /// Base demand score per crop category
    pub market_demand: HashMap<CropCategory, f64>,
    /// Base demand for categories missing from `market_demand`
    pub market_default: f64,
    /// Crop name → regions where it is traditionally grown
    pub regional_affinity: HashMap<String, Vec<String>>,
}

impl Default for ScoringTables {
    fn default() -> Self {
        let market_demand = CropCategory::KNOWN
            .iter()
            .map(|&category| (category, default_market_demand(category)))
            .collect();

        let regional_affinity = DEFAULT_AFFINITY
            .iter()
            .map(|(crop, regions)| {
                (
                    crop.to_string(),
                    regions.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect();

        Self {
            market_demand,
            market_default: MARKET_DEFAULT,
            regional_affinity,
        }
    }
}

impl ScoringTables {
    pub fn market_base(&self, category: CropCategory) -> f64 {
        self.market_demand
            .get(&category)
            .copied()
            .unwrap_or(self.market_default)
    }

    pub fn has_affinity(&self, crop: &str, region: &str) -> bool {
        self.regional_affinity
            .get(crop)
            .is_some_and(|regions| regions.iter().any(|r| r == region))
    }
}

/// The six sub-scores of one recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub climate: f64,
    pub soil: f64,
    pub economic: f64,
    pub regional: f64,
    pub market: f64,
    pub risk: f64,
}

impl ComponentScores {
    pub fn weighted_total(&self) -> f64 {
        self.climate * CLIMATE_WEIGHT
            + self.soil * SOIL_WEIGHT
            + self.economic * ECONOMIC_WEIGHT
            + self.regional * REGIONAL_WEIGHT
            + self.market * MARKET_WEIGHT
            + self.risk * RISK_WEIGHT
    }

    pub fn rounded(&self) -> Self {
        Self {
            climate: round2(self.climate),
            soil: round2(self.soil),
            economic: round2(self.economic),
            regional: round2(self.regional),
            market: round2(self.market),
            risk: round2(self.risk),
        }
    }
}

/// Mean of ROI/20 and margin/10, each clamped to `[0, 10]`.
pub fn economic_score(economics: &CropEconomics) -> f64 {
    let roi = clamp_score(economics.roi() / 20.0);
    let margin = clamp_score(economics.profit_margin() / 10.0);
    (roi + margin) / 2.0
}

pub fn regional_score(tables: &ScoringTables, crop: &CropRequirement, region: &RegionProfile) -> f64 {
    if tables.has_affinity(&crop.name, &region.name) {
        AFFINITY_SCORE
    } else if matches!(crop.category, CropCategory::Cereals | CropCategory::Pulses)
        && STAPLE_ZONES.contains(&region.climate_zone.as_str())
    {
        STAPLE_ZONE_SCORE
    } else {
        NEUTRAL_REGIONAL_SCORE
    }
}

pub fn market_score(tables: &ScoringTables, crop: &CropRequirement) -> f64 {
    let price = crop.economics.market_price;
    let bonus = if price > 3000.0 {
        1.0
    } else if price > 2000.0 {
        0.5
    } else {
        0.0
    };
    clamp_score(tables.market_base(crop.category) + bonus)
}

fn water_risk(requirement: WaterRequirement) -> f64 {
    match requirement {
        WaterRequirement::Low => 9.0,
        WaterRequirement::Medium => 7.0,
        WaterRequirement::High => 3.0,
        WaterRequirement::Unknown => 5.0,
    }
}

fn weather_risk(crop: &CropRequirement, weather: &WeatherSummary) -> f64 {
    let rainfall = weather.annual_rainfall;
    if rainfall < 500.0 {
        if crop.water_requirement == WaterRequirement::Low {
            8.0
        } else {
            4.0
        }
    } else if rainfall > 2000.0 {
        if crop.category == CropCategory::Vegetables {
            5.0
        } else {
            7.0
        }
    } else {
        8.0
    }
}

fn period_risk(days: u32) -> f64 {
    if days < 90 {
        9.0
    } else if days < 120 {
        7.0
    } else {
        6.0
    }
}

/// Higher is safer: mean of water, weather and growing-period risk.
pub fn risk_score(crop: &CropRequirement, weather: &WeatherSummary) -> f64 {
    (water_risk(crop.water_requirement) + weather_risk(crop, weather) + period_risk(crop.growing_period_days))
        / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{find_crop, static_catalog};
    use approx::assert_relative_eq;

    fn crop(name: &str) -> CropRequirement {
        find_crop(&static_catalog(), name).cloned().unwrap()
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = CLIMATE_WEIGHT + SOIL_WEIGHT + ECONOMIC_WEIGHT + REGIONAL_WEIGHT + MARKET_WEIGHT + RISK_WEIGHT;
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_economic_score_wheat() {
        // revenue 55000, profit 30000: ROI 120% -> 6.0, margin 54.5% -> 5.45
        let score = economic_score(&crop("Wheat").economics);
        assert_relative_eq!(score, (6.0 + 30000.0 / 55000.0 * 10.0) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_economic_score_clamps_both_sides() {
        // margin 99.999999%, ROI far past the ceiling
        let windfall = CropEconomics::new(1_000_000.0, 1.0, 100.0);
        assert_relative_eq!(economic_score(&windfall), 10.0, epsilon = 1e-6);

        let loss = CropEconomics::new(1.0, 100_000.0, 1.0);
        assert_eq!(economic_score(&loss), 0.0);

        let free = CropEconomics::new(1000.0, 0.0, 10.0);
        // ROI 0 by definition, margin 100%
        assert_eq!(economic_score(&free), 5.0);
    }

    #[test]
    fn test_regional_score_tiers() {
        let tables = ScoringTables::default();
        let punjab = RegionProfile::minimal("Punjab", "Subtropical Continental");
        let up = RegionProfile::minimal("Bihar", "Subtropical");

        assert_eq!(regional_score(&tables, &crop("Wheat"), &punjab), 8.0);
        // Zone must match exactly
        assert_eq!(regional_score(&tables, &crop("Maize"), &punjab), 5.0);
        assert_eq!(regional_score(&tables, &crop("Maize"), &up), 6.0);
        assert_eq!(regional_score(&tables, &crop("Tomato"), &up), 5.0);
    }

    #[test]
    fn test_market_score() {
        let tables = ScoringTables::default();
        // Pulses 9 + 1 capped at 10
        assert_eq!(market_score(&tables, &crop("Moong (Mung Bean)")), 10.0);
        // Cereals 7 + 0.5
        assert_eq!(market_score(&tables, &crop("Wheat")), 7.5);
        // Vegetables 8.5, price 1200
        assert_eq!(market_score(&tables, &crop("Potato")), 8.5);

        let mut spice = crop("Wheat");
        spice.category = CropCategory::Other;
        spice.economics.market_price = 1000.0;
        assert_eq!(market_score(&tables, &spice), MARKET_DEFAULT);
    }

    #[test]
    fn test_market_table_override() {
        let mut tables = ScoringTables::default();
        tables.market_demand.insert(CropCategory::Cereals, 4.0);
        assert_eq!(market_score(&tables, &crop("Maize")), 4.0);
    }

    #[test]
    fn test_risk_score() {
        let dry = WeatherSummary::from_normals(24.0, 400.0, 50.0, 20);
        let normal = WeatherSummary::from_normals(24.0, 1000.0, 60.0, 60);
        let wet = WeatherSummary::from_normals(26.0, 2500.0, 85.0, 120);

        // Mustard: Low water (9), dry Low tier (8), 120 days (6)
        assert_relative_eq!(risk_score(&crop("Mustard"), &dry), 23.0 / 3.0);
        // Wheat on dry: 7 + 4 + 6
        assert_relative_eq!(risk_score(&crop("Wheat"), &dry), 17.0 / 3.0);
        // Tomato on wet: 3 + 5 + 6
        assert_relative_eq!(risk_score(&crop("Tomato"), &wet), 14.0 / 3.0);
        // Moong on normal: 9 + 8 + 9
        assert_relative_eq!(risk_score(&crop("Moong (Mung Bean)"), &normal), 26.0 / 3.0);
    }

    #[test]
    fn test_weighted_total() {
        let scores = ComponentScores {
            climate: 10.0,
            soil: 10.0,
            economic: 10.0,
            regional: 10.0,
            market: 10.0,
            risk: 10.0,
        };
        assert_relative_eq!(scores.weighted_total(), 10.0, epsilon = 1e-12);
    }
}
