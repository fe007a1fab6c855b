//! Crop recommendation engine.
//!
//! Scoring is synchronous and pure: the engine holds an immutable catalog
//! snapshot, the soil database and the scoring tables, and every call derives
//! its result from its arguments alone.

pub mod scoring;

use crate::climate::{filter_by_climate, ClimateWindow};
use crate::config::RecommendationConfig;
use crate::data::SoilDatabase;
use crate::models::{CropCategory, CropRequirement, EconomicSummary, RegionProfile, WeatherSummary};
use crate::soil::{round2, score_soil_compatibility, SoilAnalysis};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub use scoring::{ComponentScores, ScoringTables};

/// Depth used by the comparison, seasonal and portfolio helpers.
const EXTENDED_TOP_N: usize = 50;
const MAX_DIVERSIFICATION_SUGGESTIONS: usize = 5;

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCrop {
    pub crop: CropRequirement,
    pub economics: EconomicSummary,
    pub scores: ComponentScores,
    pub suitability_score: f64,
    pub soil_analysis: Option<SoilAnalysis>,
}

impl ScoredCrop {
    pub fn name(&self) -> &str {
        &self.crop.name
    }
}

/// Post-scoring filters for [`RecommendationEngine::recommend_filtered`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationFilters {
    /// `None` keeps every category
    pub category: Option<CropCategory>,
    pub min_roi: f64,
    pub max_investment: f64,
    pub top_n: usize,
}

impl Default for RecommendationFilters {
    fn default() -> Self {
        Self {
            category: None,
            min_roi: 0.0,
            max_investment: f64::INFINITY,
            top_n: RecommendationConfig::default().top_n,
        }
    }
}

impl RecommendationFilters {
    pub fn accepts(&self, scored: &ScoredCrop) -> bool {
        self.category.map_or(true, |c| scored.crop.category == c)
            && scored.crop.roi() >= self.min_roi
            && scored.crop.economics.production_cost <= self.max_investment
    }
}

/// Indian cropping seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    /// Words that mark a growing-season label as belonging to this season.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Season::Kharif => &["Kharif", "Monsoon", "Jun", "Jul", "Aug"],
            Season::Rabi => &["Rabi", "Winter", "Nov", "Dec", "Jan", "Feb"],
            Season::Zaid => &["Zaid", "Summer", "Mar", "Apr", "May"],
        }
    }

    pub fn matches(&self, growing_season: &str) -> bool {
        let label = growing_season.to_lowercase();
        self.keywords()
            .iter()
            .any(|keyword| label.contains(&keyword.to_lowercase()))
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "kharif" => Some(Season::Kharif),
            "rabi" => Some(Season::Rabi),
            "zaid" => Some(Season::Zaid),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        };
        f.write_str(label)
    }
}

pub struct RecommendationEngine {
    catalog: Arc<Vec<CropRequirement>>,
    soils: Arc<SoilDatabase>,
    tables: ScoringTables,
    settings: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Vec<CropRequirement>>, soils: Arc<SoilDatabase>) -> Self {
        Self {
            catalog,
            soils,
            tables: ScoringTables::default(),
            settings: RecommendationConfig::default(),
        }
    }

    pub fn with_tables(mut self, tables: ScoringTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_settings(mut self, settings: RecommendationConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn catalog(&self) -> &[CropRequirement] {
        &self.catalog
    }

    pub fn settings(&self) -> &RecommendationConfig {
        &self.settings
    }

    /// Rank the catalog for `region` under `weather`, best first.
    pub fn recommend(
        &self,
        region: &RegionProfile,
        weather: &WeatherSummary,
        top_n: usize,
    ) -> Vec<ScoredCrop> {
        let window = ClimateWindow::from_weather(weather, self.settings.target_ph);
        let soil = self.soils.get(&region.name);

        if soil.is_none() {
            debug!(
                "No soil profile for {}, using neutral soil score {}",
                region.name, self.settings.default_soil_score
            );
        }

        let mut ranked: Vec<(usize, ScoredCrop)> = filter_by_climate(&self.catalog, &window)
            .into_iter()
            .map(|matched| {
                let crop = matched.crop;
                let soil_analysis = soil.map(|profile| score_soil_compatibility(crop, profile));

                // Combined unrounded, except soil which enters as reported.
                let scores = ComponentScores {
                    climate: matched.climate_score,
                    soil: soil_analysis
                        .as_ref()
                        .map_or(self.settings.default_soil_score, |a| a.overall_score),
                    economic: scoring::economic_score(&crop.economics),
                    regional: scoring::regional_score(&self.tables, crop, region),
                    market: scoring::market_score(&self.tables, crop),
                    risk: scoring::risk_score(crop, weather),
                };
                let suitability_score = round2(scores.weighted_total());

                debug!(
                    "{}: climate {:.2} soil {:.2} economic {:.2} regional {:.2} market {:.2} risk {:.2} -> {:.2}",
                    crop.name,
                    scores.climate,
                    scores.soil,
                    scores.economic,
                    scores.regional,
                    scores.market,
                    scores.risk,
                    suitability_score
                );

                (
                    matched.catalog_index,
                    ScoredCrop {
                        crop: crop.clone(),
                        economics: crop.economics.summary(),
                        scores: scores.rounded(),
                        suitability_score,
                        soil_analysis,
                    },
                )
            })
            .collect();

        ranked.sort_by(|(a_index, a), (b_index, b)| {
            b.suitability_score
                .total_cmp(&a.suitability_score)
                .then(a_index.cmp(b_index))
        });

        ranked
            .into_iter()
            .take(top_n)
            .map(|(_, scored)| scored)
            .collect()
    }

    /// [`recommend`](Self::recommend) at `filters.top_n`, then keep the
    /// entries passing `filters`.
    pub fn recommend_filtered(
        &self,
        region: &RegionProfile,
        weather: &WeatherSummary,
        filters: &RecommendationFilters,
    ) -> Vec<ScoredCrop> {
        self.recommend(region, weather, filters.top_n)
            .into_iter()
            .filter(|scored| filters.accepts(scored))
            .collect()
    }

    /// Scored entries for `names`, in the requested order. Names that are
    /// unknown or fail the climate filter are skipped.
    pub fn compare_crops(
        &self,
        names: &[&str],
        region: &RegionProfile,
        weather: &WeatherSummary,
    ) -> Vec<ScoredCrop> {
        let ranked = self.recommend(region, weather, EXTENDED_TOP_N);
        names
            .iter()
            .filter_map(|name| ranked.iter().find(|scored| scored.name() == *name).cloned())
            .collect()
    }

    pub fn seasonal_recommendations(
        &self,
        region: &RegionProfile,
        weather: &WeatherSummary,
        season: Season,
    ) -> Vec<ScoredCrop> {
        self.recommend(region, weather, EXTENDED_TOP_N)
            .into_iter()
            .filter(|scored| season.matches(&scored.crop.growing_season))
            .collect()
    }

    /// [`seasonal_recommendations`](Self::seasonal_recommendations) narrowed by
    /// `filters` and cut to `filters.top_n`.
    pub fn seasonal_filtered(
        &self,
        region: &RegionProfile,
        weather: &WeatherSummary,
        season: Season,
        filters: &RecommendationFilters,
    ) -> Vec<ScoredCrop> {
        self.seasonal_recommendations(region, weather, season)
            .into_iter()
            .filter(|scored| filters.accepts(scored))
            .take(filters.top_n)
            .collect()
    }

    /// Allocation-weighted mean of `10 - risk_score` over `crops`.
    ///
    /// Returns `None` when the slices differ in length or the allocations do
    /// not sum to a positive total. Crops missing from the ranking add nothing.
    pub fn portfolio_risk(
        &self,
        crops: &[&str],
        allocations: &[f64],
        region: &RegionProfile,
        weather: &WeatherSummary,
    ) -> Option<f64> {
        if crops.len() != allocations.len() {
            return None;
        }
        let total: f64 = allocations.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let ranked = self.recommend(region, weather, EXTENDED_TOP_N);
        let risk: f64 = crops
            .iter()
            .zip(allocations)
            .filter_map(|(name, allocation)| {
                ranked
                    .iter()
                    .find(|scored| scored.name() == *name)
                    .map(|scored| allocation / total * (10.0 - scored.scores.risk))
            })
            .sum();

        Some(risk)
    }

    /// Up to five ranked crops from categories not yet grown.
    pub fn diversification_suggestions(
        &self,
        current: &[&str],
        region: &RegionProfile,
        weather: &WeatherSummary,
    ) -> Vec<ScoredCrop> {
        let ranked = self.recommend(region, weather, EXTENDED_TOP_N);

        let held: HashSet<CropCategory> = ranked
            .iter()
            .filter(|scored| current.contains(&scored.name()))
            .map(|scored| scored.crop.category)
            .collect();

        ranked
            .into_iter()
            .filter(|scored| !held.contains(&scored.crop.category) && !current.contains(&scored.name()))
            .take(MAX_DIVERSIFICATION_SUGGESTIONS)
            .collect()
    }
}
