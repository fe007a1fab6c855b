use crate::error::{AppError, Result};
use crate::models::{RegionProfile, ValueRange};

struct RegionRow {
    name: &'static str,
    lat: f64,
    lon: f64,
    climate_zone: &'static str,
    soil_type: &'static str,
    annual_rainfall: f64,
    temp_range: (f64, f64),
    major_crops: &'static [&'static str],
    agricultural_zone: &'static str,
    /// Long-run mean temperature (°C), used for climatological weather normals
    mean_temp: f64,
    /// Long-run mean relative humidity (%)
    mean_humidity: f64,
}

const REGIONS: &[RegionRow] = &[
    RegionRow {
        name: "Punjab",
        lat: 31.1471,
        lon: 75.3412,
        climate_zone: "Subtropical Continental",
        soil_type: "Alluvial",
        annual_rainfall: 600.0,
        temp_range: (5.0, 45.0),
        major_crops: &["Wheat", "Rice", "Maize", "Cotton"],
        agricultural_zone: "Indo-Gangetic Plains",
        mean_temp: 24.0,
        mean_humidity: 65.0,
    },
    RegionRow {
        name: "Maharashtra",
        lat: 19.7515,
        lon: 75.7139,
        climate_zone: "Tropical Monsoon",
        soil_type: "Black Cotton",
        annual_rainfall: 1200.0,
        temp_range: (12.0, 42.0),
        major_crops: &["Sugarcane", "Cotton", "Soybean", "Onion"],
        agricultural_zone: "Western Plateau",
        mean_temp: 26.0,
        mean_humidity: 70.0,
    },
    RegionRow {
        name: "Tamil Nadu",
        lat: 11.1271,
        lon: 78.6569,
        climate_zone: "Tropical",
        soil_type: "Red Sandy",
        annual_rainfall: 1000.0,
        temp_range: (19.0, 37.0),
        major_crops: &["Rice", "Sugarcane", "Cotton", "Groundnut"],
        agricultural_zone: "Southern Peninsula",
        mean_temp: 28.0,
        mean_humidity: 75.0,
    },
    RegionRow {
        name: "Uttar Pradesh",
        lat: 26.8467,
        lon: 80.9462,
        climate_zone: "Subtropical",
        soil_type: "Alluvial",
        annual_rainfall: 800.0,
        temp_range: (2.0, 47.0),
        major_crops: &["Wheat", "Rice", "Sugarcane", "Potato"],
        agricultural_zone: "Indo-Gangetic Plains",
        mean_temp: 25.0,
        mean_humidity: 65.0,
    },
    RegionRow {
        name: "Karnataka",
        lat: 15.3173,
        lon: 75.7139,
        climate_zone: "Tropical Monsoon",
        soil_type: "Red Laterite",
        annual_rainfall: 1100.0,
        temp_range: (15.0, 35.0),
        major_crops: &["Rice", "Ragi", "Sugarcane", "Coffee"],
        agricultural_zone: "Southern Plateau",
        mean_temp: 25.0,
        mean_humidity: 68.0,
    },
    RegionRow {
        name: "Gujarat",
        lat: 22.2587,
        lon: 71.1924,
        climate_zone: "Semi-Arid",
        soil_type: "Black Cotton",
        annual_rainfall: 700.0,
        temp_range: (10.0, 42.0),
        major_crops: &["Cotton", "Groundnut", "Wheat", "Bajra"],
        agricultural_zone: "Western Dry Region",
        mean_temp: 27.0,
        mean_humidity: 60.0,
    },
    RegionRow {
        name: "Rajasthan",
        lat: 27.0238,
        lon: 74.2179,
        climate_zone: "Arid",
        soil_type: "Sandy Desert",
        annual_rainfall: 400.0,
        temp_range: (2.0, 50.0),
        major_crops: &["Bajra", "Jowar", "Wheat", "Mustard"],
        agricultural_zone: "Western Dry Region",
        mean_temp: 27.0,
        mean_humidity: 45.0,
    },
    RegionRow {
        name: "West Bengal",
        lat: 22.9868,
        lon: 87.8550,
        climate_zone: "Tropical Monsoon",
        soil_type: "Alluvial",
        annual_rainfall: 1500.0,
        temp_range: (10.0, 38.0),
        major_crops: &["Rice", "Jute", "Tea", "Potato"],
        agricultural_zone: "Eastern Region",
        mean_temp: 26.0,
        mean_humidity: 80.0,
    },
    RegionRow {
        name: "Andhra Pradesh",
        lat: 15.9129,
        lon: 79.7400,
        climate_zone: "Tropical",
        soil_type: "Red Sandy",
        annual_rainfall: 900.0,
        temp_range: (16.0, 40.0),
        major_crops: &["Rice", "Cotton", "Sugarcane", "Chili"],
        agricultural_zone: "Southern Peninsula",
        mean_temp: 28.0,
        mean_humidity: 70.0,
    },
    RegionRow {
        name: "Madhya Pradesh",
        lat: 22.9734,
        lon: 78.6569,
        climate_zone: "Subtropical",
        soil_type: "Black Cotton",
        annual_rainfall: 1000.0,
        temp_range: (6.0, 46.0),
        major_crops: &["Wheat", "Soybean", "Rice", "Cotton"],
        agricultural_zone: "Central Plateau",
        mean_temp: 25.0,
        mean_humidity: 65.0,
    },
    RegionRow {
        name: "Haryana",
        lat: 29.0588,
        lon: 76.0856,
        climate_zone: "Subtropical Continental",
        soil_type: "Alluvial",
        annual_rainfall: 650.0,
        temp_range: (5.0, 45.0),
        major_crops: &["Wheat", "Rice", "Sugarcane", "Cotton"],
        agricultural_zone: "Indo-Gangetic Plains",
        mean_temp: 26.0,
        mean_humidity: 70.0,
    },
    RegionRow {
        name: "Bihar",
        lat: 25.0961,
        lon: 85.3131,
        climate_zone: "Subtropical",
        soil_type: "Alluvial",
        annual_rainfall: 1200.0,
        temp_range: (5.0, 42.0),
        major_crops: &["Rice", "Wheat", "Maize", "Sugarcane"],
        agricultural_zone: "Indo-Gangetic Plains",
        mean_temp: 26.0,
        mean_humidity: 70.0,
    },
    RegionRow {
        name: "Odisha",
        lat: 20.9517,
        lon: 85.0985,
        climate_zone: "Tropical Monsoon",
        soil_type: "Red Laterite",
        annual_rainfall: 1400.0,
        temp_range: (11.0, 40.0),
        major_crops: &["Rice", "Jute", "Sugarcane", "Turmeric"],
        agricultural_zone: "Eastern Region",
        mean_temp: 26.0,
        mean_humidity: 70.0,
    },
    RegionRow {
        name: "Kerala",
        lat: 10.8505,
        lon: 76.2711,
        climate_zone: "Tropical Monsoon",
        soil_type: "Laterite",
        annual_rainfall: 2800.0,
        temp_range: (23.0, 32.0),
        major_crops: &["Rice", "Coconut", "Spices", "Rubber"],
        agricultural_zone: "Southern Peninsula",
        mean_temp: 26.0,
        mean_humidity: 70.0,
    },
    RegionRow {
        name: "Assam",
        lat: 26.2006,
        lon: 92.9376,
        climate_zone: "Subtropical Monsoon",
        soil_type: "Alluvial",
        annual_rainfall: 2200.0,
        temp_range: (8.0, 36.0),
        major_crops: &["Rice", "Tea", "Jute", "Sugarcane"],
        agricultural_zone: "Eastern Himalayan",
        mean_temp: 26.0,
        mean_humidity: 70.0,
    },
];

impl RegionRow {
    fn to_profile(&self) -> RegionProfile {
        RegionProfile {
            name: self.name.to_string(),
            latitude: self.lat,
            longitude: self.lon,
            climate_zone: self.climate_zone.to_string(),
            soil_type: self.soil_type.to_string(),
            annual_rainfall: self.annual_rainfall,
            temperature_range: ValueRange::new(self.temp_range.0, self.temp_range.1),
            agricultural_zone: self.agricultural_zone.to_string(),
            major_crops: self.major_crops.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// All built-in regions.
pub fn regions() -> Vec<RegionProfile> {
    REGIONS.iter().map(RegionRow::to_profile).collect()
}

/// Look up a built-in region by name, ignoring case.
pub fn find_region(name: &str) -> Result<RegionProfile> {
    REGIONS
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
        .map(RegionRow::to_profile)
        .ok_or_else(|| AppError::UnknownRegion(name.to_string()))
}

/// Long-run mean temperature and humidity of a built-in region.
pub fn climate_normals(name: &str) -> Option<(f64, f64)> {
    REGIONS
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
        .map(|r| (r.mean_temp, r.mean_humidity))
}
