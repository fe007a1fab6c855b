use approx::assert_relative_eq;
use crop_advisor::catalog::CatalogProvider;
use crop_advisor::config::Config;
use crop_advisor::data::{find_crop, find_region, static_catalog, SoilDatabase};
use crop_advisor::engine::{RecommendationEngine, RecommendationFilters, Season};
use crop_advisor::models::{CropCategory, CropEconomics, RegionProfile, WeatherSummary};
use std::sync::Arc;

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(static_catalog()), Arc::new(SoilDatabase::builtin()))
}

fn punjab() -> (RegionProfile, WeatherSummary) {
    (
        find_region("Punjab").unwrap(),
        WeatherSummary::from_normals(24.0, 600.0, 65.0, 40),
    )
}

/// Test the Punjab scenario end to end
#[test]
fn test_punjab_wheat_scenario() {
    let (region, weather) = punjab();
    let results = engine().recommend(&region, &weather, 15);

    let wheat = results
        .iter()
        .find(|r| r.crop.name == "Wheat")
        .expect("wheat is recommended for Punjab");

    assert!(wheat.scores.climate > 8.0);
    let soil = wheat.soil_analysis.as_ref().unwrap();
    assert_eq!(soil.component_scores.water_compatibility, 10.0);
    assert_eq!(soil.detailed_analysis.soil_ph_range.min, 6.8);
    assert_eq!(soil.detailed_analysis.soil_ph_range.max, 7.5);

    // Rice needs far more rain than the Punjab window allows
    assert!(results.iter().all(|r| r.crop.name != "Rice (Basmati)"));
}

/// Test that every score stays on the 0-10 scale and is rounded
#[test]
fn test_scores_rounded_and_bounded() {
    let (region, weather) = punjab();
    for scored in engine().recommend(&region, &weather, 15) {
        let s = scored.scores;
        for value in [s.climate, s.soil, s.economic, s.regional, s.market, s.risk, scored.suitability_score] {
            assert!((0.0..=10.0).contains(&value), "{} out of range for {}", value, scored.crop.name);
            assert_relative_eq!(value, (value * 100.0).round() / 100.0, epsilon = 1e-9);
        }
    }
}

/// Test that identical inputs give identical output
#[test]
fn test_recommend_is_deterministic() {
    let (region, weather) = punjab();
    let engine = engine();

    let first = engine.recommend(&region, &weather, 15);
    let second = engine.recommend(&region, &weather, 15);
    assert_eq!(first, second);
}

/// Test that an impossible ROI floor yields an empty list
#[test]
fn test_min_roi_filter_can_empty_the_list() {
    let (region, weather) = punjab();
    let filters = RecommendationFilters {
        min_roi: 1000.0,
        ..RecommendationFilters::default()
    };
    assert!(engine().recommend_filtered(&region, &weather, &filters).is_empty());
}

/// Test that filtering keeps the unfiltered scores
#[test]
fn test_filtering_does_not_rescore() {
    let (region, weather) = punjab();
    let engine = engine();

    let all = engine.recommend(&region, &weather, 15);
    let oilseeds = engine.recommend_filtered(
        &region,
        &weather,
        &RecommendationFilters {
            category: Some(CropCategory::Oilseeds),
            ..RecommendationFilters::default()
        },
    );

    assert!(!oilseeds.is_empty());
    for scored in &oilseeds {
        let same = all.iter().find(|r| r.crop.name == scored.crop.name).unwrap();
        assert_eq!(same, scored);
    }
}

/// Test that a zero production cost gives zero ROI rather than a division error
#[test]
fn test_zero_cost_crop() {
    let free = find_crop(&static_catalog(), "Wheat")
        .cloned()
        .unwrap()
        .with_economics(CropEconomics::new(2200.0, 0.0, 25.0));
    assert_eq!(free.roi(), 0.0);

    let engine = RecommendationEngine::new(Arc::new(vec![free]), Arc::new(SoilDatabase::builtin()));
    let (region, weather) = punjab();
    let results = engine.recommend(&region, &weather, 15);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].economics.roi, 0.0);
    // ROI term 0, margin term 10
    assert_eq!(results[0].scores.economic, 5.0);
}

/// Test that an empty catalog gives an empty result
#[test]
fn test_empty_catalog() {
    let engine = RecommendationEngine::new(Arc::new(Vec::new()), Arc::new(SoilDatabase::builtin()));
    let (region, weather) = punjab();
    assert!(engine.recommend(&region, &weather, 15).is_empty());
}

/// Test that regions without soil data use the neutral soil score
#[test]
fn test_region_without_soil_profile() {
    let region = find_region("Haryana").unwrap();
    let weather = WeatherSummary::from_normals(26.0, 650.0, 70.0, 40);

    let results = engine().recommend(&region, &weather, 15);
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.scores.soil == 7.0 && r.soil_analysis.is_none()));

    // Haryana is in the wheat affinity table even without soil data
    let wheat = results.iter().find(|r| r.crop.name == "Wheat").unwrap();
    assert_eq!(wheat.scores.regional, 8.0);
}

/// Test the seasonal view
#[test]
fn test_rabi_recommendations() {
    let (region, weather) = punjab();
    let rabi = engine().seasonal_recommendations(&region, &weather, Season::Rabi);

    let names: Vec<&str> = rabi.iter().map(|r| r.crop.name.as_str()).collect();
    assert!(names.contains(&"Wheat"));
    assert!(names.contains(&"Mustard"));
    assert!(!names.contains(&"Grapes"));
}

/// Test config-driven engine setup the way the binary wires it
#[tokio::test]
async fn test_engine_from_config_and_static_provider() {
    let config = Config::from_yaml(
        "recommendation:\n  top_n: 3\nscoring:\n  market_demand:\n    Pulses: 2.0\n",
    )
    .unwrap();

    let snapshot = CatalogProvider::static_only().snapshot(false).await;
    let engine = RecommendationEngine::new(snapshot.crops, Arc::new(SoilDatabase::builtin()))
        .with_tables(config.scoring.tables())
        .with_settings(config.recommendation);

    let (region, weather) = punjab();
    let top_n = engine.settings().top_n;
    let results = engine.recommend(&region, &weather, top_n);
    assert_eq!(results.len(), 3);

    let chana = engine.compare_crops(&["Chana (Chickpea)"], &region, &weather);
    // Pulses base lowered to 2 plus the price bonus of 1
    assert_eq!(chana[0].scores.market, 3.0);
}
