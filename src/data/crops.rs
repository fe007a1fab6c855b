//! Built-in crop catalog, used whenever no remote catalog is configured or the
//! remote fetch fails.

use crate::models::{CropCategory, CropEconomics, CropRequirement, ValueRange, WaterRequirement};

struct CropRow {
    name: &'static str,
    category: CropCategory,
    temperature: (f64, f64),
    rainfall: (f64, f64),
    soil_ph: (f64, f64),
    growing_season: &'static str,
    water: WaterRequirement,
    market_price: f64,
    production_cost: f64,
    expected_yield: f64,
    growing_period_days: u32,
}

impl CropRow {
    fn to_requirement(&self) -> CropRequirement {
        CropRequirement {
            name: self.name.to_string(),
            category: self.category,
            temperature: ValueRange::new(self.temperature.0, self.temperature.1),
            rainfall: ValueRange::new(self.rainfall.0, self.rainfall.1),
            soil_ph: ValueRange::new(self.soil_ph.0, self.soil_ph.1),
            growing_season: self.growing_season.to_string(),
            water_requirement: self.water,
            economics: CropEconomics::new(
                self.market_price,
                self.production_cost,
                self.expected_yield,
            ),
            growing_period_days: self.growing_period_days,
        }
    }
}

use CropCategory::*;
use WaterRequirement::{High, Low, Medium};

// Prices are per quintal, costs per acre, yields in quintal per acre.
const STATIC_CROPS: &[CropRow] = &[
    CropRow {
        name: "Rice (Basmati)",
        category: Cereals,
        temperature: (20.0, 35.0),
        rainfall: (1000.0, 2000.0),
        soil_ph: (5.5, 7.0),
        growing_season: "Kharif (Jun-Nov)",
        water: High,
        market_price: 4500.0,
        production_cost: 35000.0,
        expected_yield: 20.0,
        growing_period_days: 120,
    },
    CropRow {
        name: "Wheat",
        category: Cereals,
        temperature: (10.0, 25.0),
        rainfall: (300.0, 800.0),
        soil_ph: (6.0, 7.5),
        growing_season: "Rabi (Nov-Apr)",
        water: Medium,
        market_price: 2200.0,
        production_cost: 25000.0,
        expected_yield: 25.0,
        growing_period_days: 120,
    },
    CropRow {
        name: "Maize",
        category: Cereals,
        temperature: (15.0, 35.0),
        rainfall: (500.0, 1200.0),
        soil_ph: (5.8, 7.8),
        growing_season: "Kharif/Rabi",
        water: Medium,
        market_price: 1800.0,
        production_cost: 20000.0,
        expected_yield: 30.0,
        growing_period_days: 90,
    },
    CropRow {
        name: "Chana (Chickpea)",
        category: Pulses,
        temperature: (15.0, 30.0),
        rainfall: (300.0, 600.0),
        soil_ph: (6.0, 7.5),
        growing_season: "Rabi (Oct-Mar)",
        water: Low,
        market_price: 5500.0,
        production_cost: 18000.0,
        expected_yield: 12.0,
        growing_period_days: 110,
    },
    CropRow {
        name: "Moong (Mung Bean)",
        category: Pulses,
        temperature: (20.0, 40.0),
        rainfall: (300.0, 800.0),
        soil_ph: (6.2, 7.2),
        growing_season: "Kharif/Summer",
        water: Low,
        market_price: 6000.0,
        production_cost: 15000.0,
        expected_yield: 8.0,
        growing_period_days: 70,
    },
    CropRow {
        name: "Urad (Black Gram)",
        category: Pulses,
        temperature: (20.0, 35.0),
        rainfall: (400.0, 800.0),
        soil_ph: (6.0, 7.0),
        growing_season: "Kharif (Jun-Oct)",
        water: Medium,
        market_price: 6500.0,
        production_cost: 16000.0,
        expected_yield: 6.0,
        growing_period_days: 80,
    },
    CropRow {
        name: "Soybean",
        category: Oilseeds,
        temperature: (20.0, 30.0),
        rainfall: (450.0, 700.0),
        soil_ph: (6.0, 7.5),
        growing_season: "Kharif (Jun-Oct)",
        water: Medium,
        market_price: 4200.0,
        production_cost: 22000.0,
        expected_yield: 18.0,
        growing_period_days: 100,
    },
    CropRow {
        name: "Sunflower",
        category: Oilseeds,
        temperature: (18.0, 35.0),
        rainfall: (400.0, 800.0),
        soil_ph: (6.0, 8.0),
        growing_season: "Kharif/Rabi",
        water: Medium,
        market_price: 5800.0,
        production_cost: 20000.0,
        expected_yield: 12.0,
        growing_period_days: 90,
    },
    CropRow {
        name: "Mustard",
        category: Oilseeds,
        temperature: (10.0, 25.0),
        rainfall: (200.0, 500.0),
        soil_ph: (6.0, 7.5),
        growing_season: "Rabi (Oct-Mar)",
        water: Low,
        market_price: 4800.0,
        production_cost: 18000.0,
        expected_yield: 10.0,
        growing_period_days: 120,
    },
    CropRow {
        name: "Tomato",
        category: Vegetables,
        temperature: (18.0, 27.0),
        rainfall: (200.0, 400.0),
        soil_ph: (6.0, 7.0),
        growing_season: "All seasons",
        water: High,
        market_price: 2500.0,
        production_cost: 45000.0,
        expected_yield: 150.0,
        growing_period_days: 120,
    },
    CropRow {
        name: "Potato",
        category: Vegetables,
        temperature: (15.0, 25.0),
        rainfall: (200.0, 400.0),
        soil_ph: (5.0, 7.0),
        growing_season: "Rabi (Oct-Feb)",
        water: Medium,
        market_price: 1200.0,
        production_cost: 30000.0,
        expected_yield: 80.0,
        growing_period_days: 90,
    },
    CropRow {
        name: "Onion",
        category: Vegetables,
        temperature: (13.0, 24.0),
        rainfall: (150.0, 400.0),
        soil_ph: (5.8, 7.0),
        growing_season: "Rabi (Nov-Apr)",
        water: Medium,
        market_price: 1800.0,
        production_cost: 35000.0,
        expected_yield: 100.0,
        growing_period_days: 120,
    },
    CropRow {
        name: "Chili",
        category: Vegetables,
        temperature: (20.0, 35.0),
        rainfall: (300.0, 600.0),
        soil_ph: (6.0, 7.0),
        growing_season: "Kharif/Rabi",
        water: Medium,
        market_price: 8000.0,
        production_cost: 40000.0,
        expected_yield: 25.0,
        growing_period_days: 150,
    },
    CropRow {
        name: "Mango (Seasonal)",
        category: Fruits,
        temperature: (24.0, 30.0),
        rainfall: (750.0, 2500.0),
        soil_ph: (5.5, 7.5),
        growing_season: "Perennial",
        water: Medium,
        market_price: 6000.0,
        production_cost: 80000.0,
        expected_yield: 50.0,
        growing_period_days: 365,
    },
    CropRow {
        name: "Banana",
        category: Fruits,
        temperature: (26.0, 30.0),
        rainfall: (1200.0, 2500.0),
        soil_ph: (6.0, 7.5),
        growing_season: "All year",
        water: High,
        market_price: 1500.0,
        production_cost: 60000.0,
        expected_yield: 200.0,
        growing_period_days: 365,
    },
    CropRow {
        name: "Grapes",
        category: Fruits,
        temperature: (15.0, 40.0),
        rainfall: (400.0, 1200.0),
        soil_ph: (6.5, 8.0),
        growing_season: "Perennial",
        water: Medium,
        market_price: 4000.0,
        production_cost: 120000.0,
        expected_yield: 80.0,
        growing_period_days: 365,
    },
];

/// The static crop catalog, in catalog order.
pub fn static_catalog() -> Vec<CropRequirement> {
    STATIC_CROPS.iter().map(CropRow::to_requirement).collect()
}

pub fn find_crop<'a>(catalog: &'a [CropRequirement], name: &str) -> Option<&'a CropRequirement> {
    catalog.iter().find(|crop| crop.name == name)
}

/// Crops of one category, or the whole catalog for `None` ("All").
pub fn crops_by_category(
    catalog: &[CropRequirement],
    category: Option<CropCategory>,
) -> Vec<&CropRequirement> {
    catalog
        .iter()
        .filter(|crop| category.map_or(true, |c| crop.category == c))
        .collect()
}
