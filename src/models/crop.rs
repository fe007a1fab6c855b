use super::ValueRange;
use serde::{Deserialize, Serialize};

labelled_enum! {
    /// Crop family. Drives nutrient needs, market demand and regional fit.
    pub enum CropCategory {
        Cereals => "Cereals",
        Pulses => "Pulses",
        Oilseeds => "Oilseeds",
        Vegetables => "Vegetables",
        Fruits => "Fruits",
    }
    fallback Other
}

labelled_enum! {
    /// Irrigation demand tier of a crop.
    pub enum WaterRequirement {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
    fallback Unknown
}

/// Price, cost and yield of one crop per acre.
///
/// Margin and ROI are always derived from this triple, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropEconomics {
    /// Currency per quintal
    pub market_price: f64,
    /// Currency per acre
    pub production_cost: f64,
    /// Quintal per acre
    pub expected_yield: f64,
}

impl CropEconomics {
    pub fn new(market_price: f64, production_cost: f64, expected_yield: f64) -> Self {
        Self {
            market_price,
            production_cost,
            expected_yield,
        }
    }

    pub fn revenue(&self) -> f64 {
        self.expected_yield * self.market_price
    }

    pub fn profit(&self) -> f64 {
        self.revenue() - self.production_cost
    }

    /// Profit as a percentage of revenue, 0 when there is no revenue.
    pub fn profit_margin(&self) -> f64 {
        let revenue = self.revenue();
        if revenue > 0.0 {
            self.profit() / revenue * 100.0
        } else {
            0.0
        }
    }

    /// Profit as a percentage of production cost, 0 when cost is not positive.
    pub fn roi(&self) -> f64 {
        if self.production_cost > 0.0 {
            self.profit() / self.production_cost * 100.0
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> EconomicSummary {
        EconomicSummary {
            revenue: self.revenue(),
            profit: self.profit(),
            profit_margin: self.profit_margin(),
            roi: self.roi(),
        }
    }
}

/// Derived economics, computed together from one `CropEconomics`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EconomicSummary {
    pub revenue: f64,
    pub profit: f64,
    pub profit_margin: f64,
    pub roi: f64,
}

/// Growth requirements and economics of one crop variety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRequirement {
    pub name: String,
    pub category: CropCategory,
    /// °C
    pub temperature: ValueRange,
    /// mm per year
    pub rainfall: ValueRange,
    pub soil_ph: ValueRange,
    pub growing_season: String,
    pub water_requirement: WaterRequirement,
    pub economics: CropEconomics,
    pub growing_period_days: u32,
}

impl CropRequirement {
    pub fn roi(&self) -> f64 {
        self.economics.roi()
    }

    pub fn profit_margin(&self) -> f64 {
        self.economics.profit_margin()
    }

    pub fn with_economics(mut self, economics: CropEconomics) -> Self {
        self.economics = economics;
        self
    }
}
