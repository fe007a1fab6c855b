//! Climate suitability filter.
//!
//! Keeps crops whose temperature and rainfall envelopes overlap a window
//! derived from regional weather and whose pH range admits the target pH,
//! then scores how closely the envelope midpoints line up.

use crate::models::{CropRequirement, ValueRange, WeatherSummary};
use tracing::debug;

/// Soil pH assumed for the climate pass when no other target is given.
pub const DEFAULT_TARGET_PH: f64 = 6.5;

/// Half-width of the temperature window around the regional mean (°C).
const TEMPERATURE_SPREAD: f64 = 5.0;

/// Rainfall window as fractions of annual rainfall.
const RAINFALL_LOWER_FACTOR: f64 = 0.8;
const RAINFALL_UPPER_FACTOR: f64 = 1.2;

/// Midpoint distance that costs one point of temperature score (°C).
const TEMPERATURE_POINT: f64 = 5.0;

/// Midpoint distance that costs one point of rainfall score (mm).
const RAINFALL_POINT: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateWindow {
    pub temperature: ValueRange,
    pub rainfall: ValueRange,
    pub target_ph: f64,
}

impl ClimateWindow {
    pub fn new(temperature: ValueRange, rainfall: ValueRange, target_ph: f64) -> Self {
        Self {
            temperature,
            rainfall,
            target_ph,
        }
    }

    /// `[avg_temp ± 5]` and `[rainfall × 0.8, rainfall × 1.2]`.
    pub fn from_weather(weather: &WeatherSummary, target_ph: f64) -> Self {
        Self {
            temperature: ValueRange::new(
                weather.avg_temp - TEMPERATURE_SPREAD,
                weather.avg_temp + TEMPERATURE_SPREAD,
            ),
            rainfall: ValueRange::new(
                weather.annual_rainfall * RAINFALL_LOWER_FACTOR,
                weather.annual_rainfall * RAINFALL_UPPER_FACTOR,
            ),
            target_ph,
        }
    }

    pub fn admits(&self, crop: &CropRequirement) -> bool {
        crop.temperature.overlaps(&self.temperature)
            && crop.rainfall.overlaps(&self.rainfall)
            && crop.soil_ph.contains(self.target_ph)
    }

    pub fn temperature_score(&self, crop: &CropRequirement) -> f64 {
        let distance = (crop.temperature.midpoint() - self.temperature.midpoint()).abs();
        clamp_score(10.0 - distance / TEMPERATURE_POINT)
    }

    pub fn rainfall_score(&self, crop: &CropRequirement) -> f64 {
        let distance = (crop.rainfall.midpoint() - self.rainfall.midpoint()).abs();
        clamp_score(10.0 - distance / RAINFALL_POINT)
    }

    pub fn climate_score(&self, crop: &CropRequirement) -> f64 {
        (self.temperature_score(crop) + self.rainfall_score(crop)) / 2.0
    }
}

/// A crop that passed the climate filter.
#[derive(Debug, Clone, Copy)]
pub struct ClimateMatch<'a> {
    pub crop: &'a CropRequirement,
    /// Position of the crop in the catalog it came from
    pub catalog_index: usize,
    pub climate_score: f64,
}

/// Filter `catalog` through `window`, best climate score first.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn filter_by_climate<'a>(
    catalog: &'a [CropRequirement],
    window: &ClimateWindow,
) -> Vec<ClimateMatch<'a>> {
    let mut matches: Vec<ClimateMatch<'a>> = catalog
        .iter()
        .enumerate()
        .filter(|(_, crop)| window.admits(crop))
        .map(|(catalog_index, crop)| ClimateMatch {
            crop,
            catalog_index,
            climate_score: window.climate_score(crop),
        })
        .collect();

    matches.sort_by(|a, b| b.climate_score.total_cmp(&a.climate_score));

    debug!(
        "Climate filter kept {}/{} crops (temp {:.1}-{:.1}, rain {:.0}-{:.0}, pH {:.1})",
        matches.len(),
        catalog.len(),
        window.temperature.min,
        window.temperature.max,
        window.rainfall.min,
        window.rainfall.max,
        window.target_ph
    );

    matches
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 10.0)
}
