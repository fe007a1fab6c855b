use crop_advisor::climate::ClimateWindow;
use crop_advisor::data::SoilDatabase;
use crop_advisor::engine::scoring::{economic_score, market_score, regional_score, risk_score, ScoringTables};
use crop_advisor::engine::RecommendationEngine;
use crop_advisor::models::{
    CropCategory, CropEconomics, CropRequirement, Drainage, ErosionRisk, NutrientLevel,
    NutrientProfile, RegionProfile, SalinityLevel, SoilProfile, ValueRange, WaterRequirement,
    WeatherSummary,
};
use crop_advisor::soil::score_soil_compatibility;
use proptest::prelude::*;
use std::sync::Arc;

fn in_scale(value: f64) -> bool {
    (0.0..=10.0).contains(&value)
}

fn range() -> impl Strategy<Value = ValueRange> {
    (-1e6..1e6f64, 0.0..1e6f64).prop_map(|(min, width)| ValueRange::new(min, min + width))
}

fn label<T: Copy + std::fmt::Debug + 'static>(known: &'static [T], fallback: T) -> impl Strategy<Value = T> {
    (0..=known.len()).prop_map(move |i| known.get(i).copied().unwrap_or(fallback))
}

prop_compose! {
    fn crop()(
        category in label(CropCategory::KNOWN, CropCategory::Other),
        water in label(WaterRequirement::KNOWN, WaterRequirement::Unknown),
        temperature in range(),
        rainfall in range(),
        soil_ph in range(),
        price in -1e6..1e6f64,
        cost in -1e6..1e6f64,
        expected_yield in -1e6..1e6f64,
        days in 0u32..1000,
    ) -> CropRequirement {
        CropRequirement {
            name: "Generated".to_string(),
            category,
            temperature,
            rainfall,
            soil_ph,
            growing_season: "Kharif".to_string(),
            water_requirement: water,
            economics: CropEconomics::new(price, cost, expected_yield),
            growing_period_days: days,
        }
    }
}

prop_compose! {
    fn soil()(
        ph_range in range(),
        nitrogen in label(NutrientLevel::KNOWN, NutrientLevel::Unknown),
        phosphorus in label(NutrientLevel::KNOWN, NutrientLevel::Unknown),
        potassium in label(NutrientLevel::KNOWN, NutrientLevel::Unknown),
        drainage in label(Drainage::KNOWN, Drainage::Unknown),
        erosion_risk in label(ErosionRisk::KNOWN, ErosionRisk::Unknown),
    ) -> SoilProfile {
        SoilProfile {
            primary_soil: "Generated".to_string(),
            secondary_soils: Vec::new(),
            ph_range,
            organic_matter_pct: 0.5,
            nutrients: NutrientProfile { nitrogen, phosphorus, potassium },
            drainage,
            erosion_risk,
            salinity: SalinityLevel::Unknown,
            soil_depth: String::new(),
            water_holding_capacity: String::new(),
            texture_class: String::new(),
            cec: 0.0,
            bulk_density: 0.0,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn component_scores_stay_in_scale(
        crop in crop(),
        soil in soil(),
        avg_temp in -1e6..1e6f64,
        annual_rainfall in 0.0..1e6f64,
        target_ph in 0.0..14.0f64,
    ) {
        let weather = WeatherSummary::from_normals(avg_temp, annual_rainfall, 50.0, 30);
        let window = ClimateWindow::from_weather(&weather, target_ph);
        let tables = ScoringTables::default();
        let region = RegionProfile::minimal("Punjab", "Tropical");

        prop_assert!(in_scale(window.temperature_score(&crop)));
        prop_assert!(in_scale(window.rainfall_score(&crop)));
        prop_assert!(in_scale(window.climate_score(&crop)));
        prop_assert!(in_scale(economic_score(&crop.economics)));
        prop_assert!(in_scale(regional_score(&tables, &crop, &region)));
        prop_assert!(in_scale(market_score(&tables, &crop)));
        prop_assert!(in_scale(risk_score(&crop, &weather)));

        let analysis = score_soil_compatibility(&crop, &soil);
        let c = analysis.component_scores;
        for value in [analysis.overall_score, c.ph_compatibility, c.water_compatibility, c.nutrient_adequacy, c.erosion_risk] {
            prop_assert!(in_scale(value), "soil score {} out of range", value);
        }
    }

    #[test]
    fn final_scores_stay_in_scale(
        crops in prop::collection::vec(crop(), 0..8),
        avg_temp in -100.0..100.0f64,
        annual_rainfall in 0.0..5000.0f64,
    ) {
        let mut soils = SoilDatabase::new();
        soils.insert("Punjab", SoilDatabase::builtin().get("Punjab").cloned().unwrap());
        let engine = RecommendationEngine::new(Arc::new(crops), Arc::new(soils));

        let weather = WeatherSummary::from_normals(avg_temp, annual_rainfall, 50.0, 30);
        let region = RegionProfile::minimal("Punjab", "Subtropical");

        for scored in engine.recommend(&region, &weather, 50) {
            prop_assert!(in_scale(scored.suitability_score));
            let s = scored.scores;
            for value in [s.climate, s.soil, s.economic, s.regional, s.market, s.risk] {
                prop_assert!(in_scale(value));
            }
        }
    }
}
