use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One calendar month of climate data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyWeather {
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_temp: f64,
    /// mm
    pub rainfall: f64,
    /// Percent relative humidity
    pub humidity: f64,
}

/// Region-scoped climate aggregate over twelve calendar months.
///
/// Only constructible from a full monthly series, so the aggregates always
/// agree with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub avg_temp: f64,
    pub annual_rainfall: f64,
    pub avg_humidity: f64,
    pub rainy_days: u32,
    monthly: [MonthlyWeather; 12],
}

/// On-disk weather input: the monthly series plus a rainy-day count.
#[derive(Debug, Deserialize)]
struct WeatherFile {
    monthly: [MonthlyWeather; 12],
    #[serde(default)]
    rainy_days: u32,
}

impl WeatherSummary {
    pub fn from_monthly(monthly: [MonthlyWeather; 12], rainy_days: u32) -> Self {
        let avg_temp = monthly.iter().map(|m| m.avg_temp).sum::<f64>() / 12.0;
        let annual_rainfall = monthly.iter().map(|m| m.rainfall).sum::<f64>();
        let avg_humidity = monthly.iter().map(|m| m.humidity).sum::<f64>() / 12.0;

        Self {
            avg_temp,
            annual_rainfall,
            avg_humidity,
            rainy_days,
            monthly,
        }
    }

    /// Flat climatological normals: every month carries the annual mean
    /// temperature and humidity and one twelfth of the rainfall.
    pub fn from_normals(avg_temp: f64, annual_rainfall: f64, avg_humidity: f64, rainy_days: u32) -> Self {
        let month = MonthlyWeather {
            min_temp: avg_temp - 5.0,
            max_temp: avg_temp + 5.0,
            avg_temp,
            rainfall: annual_rainfall / 12.0,
            humidity: avg_humidity,
        };
        Self::from_monthly([month; 12], rainy_days)
    }

    /// Load a JSON weather file (`{"monthly": [...12 entries], "rainy_days": n}`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let file: WeatherFile = serde_json::from_str(&content).map_err(|e| {
            AppError::Parse(format!(
                "Failed to parse weather file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self::from_monthly(file.monthly, file.rainy_days))
    }

    pub fn monthly(&self) -> &[MonthlyWeather; 12] {
        &self.monthly
    }

    /// Iterate months with their calendar labels.
    pub fn months(&self) -> impl Iterator<Item = (&'static str, &MonthlyWeather)> {
        MONTHS.iter().copied().zip(self.monthly.iter())
    }

    pub fn climate_class(&self) -> ClimateClass {
        ClimateClass::classify(self.avg_temp, self.annual_rainfall)
    }
}

/// Coarse climate classification from mean temperature and annual rainfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClimateClass {
    TropicalWet,
    SubtropicalWet,
    TropicalModerate,
    SubtropicalModerate,
    SemiAridHot,
    SemiAridCool,
}

impl ClimateClass {
    pub fn classify(avg_temp: f64, annual_rainfall: f64) -> Self {
        let hot = avg_temp > 25.0;
        if annual_rainfall > 1500.0 {
            if hot {
                ClimateClass::TropicalWet
            } else {
                ClimateClass::SubtropicalWet
            }
        } else if annual_rainfall > 750.0 {
            if hot {
                ClimateClass::TropicalModerate
            } else {
                ClimateClass::SubtropicalModerate
            }
        } else if hot {
            ClimateClass::SemiAridHot
        } else {
            ClimateClass::SemiAridCool
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateClass::TropicalWet => "Tropical Wet",
            ClimateClass::SubtropicalWet => "Subtropical Wet",
            ClimateClass::TropicalModerate => "Tropical Moderate",
            ClimateClass::SubtropicalModerate => "Subtropical Moderate",
            ClimateClass::SemiAridHot => "Semi-Arid Hot",
            ClimateClass::SemiAridCool => "Semi-Arid Cool",
        }
    }
}

impl fmt::Display for ClimateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
