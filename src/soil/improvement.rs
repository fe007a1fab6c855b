//! Soil improvement planning and advisory lists for a region's soil.

use crate::models::{Drainage, NutrientLevel, SalinityLevel, SoilProfile};
use serde::Serialize;

const ACIDIC_PH: f64 = 6.0;
const ALKALINE_PH: f64 = 8.0;
const LOW_ORGANIC_MATTER_PCT: f64 = 1.0;
const CRITICAL_ORGANIC_MATTER_PCT: f64 = 0.5;
const TARGET_ORGANIC_MATTER_PCT: f64 = 1.5;

/// One costed step of a soil improvement plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementAction {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    pub cost_per_hectare: f64,
    pub timeline: String,
}

impl ImprovementAction {
    fn new(action: impl Into<String>, cost_per_hectare: f64, timeline: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            details: None,
            methods: Vec::new(),
            cost_per_hectare,
            timeline: timeline.into(),
        }
    }

    fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn methods(mut self, methods: &[&str]) -> Self {
        self.methods = methods.iter().map(|m| m.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoilImprovementPlan {
    pub immediate_actions: Vec<ImprovementAction>,
    pub short_term_goals: Vec<ImprovementAction>,
    pub long_term_strategies: Vec<ImprovementAction>,
}

impl SoilImprovementPlan {
    pub fn actions(&self) -> impl Iterator<Item = &ImprovementAction> {
        self.immediate_actions
            .iter()
            .chain(&self.short_term_goals)
            .chain(&self.long_term_strategies)
    }

    pub fn total_cost_per_hectare(&self) -> f64 {
        self.actions().map(|a| a.cost_per_hectare).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.actions().next().is_none()
    }
}

fn fertilizer_cost(level: NutrientLevel) -> Option<f64> {
    match level {
        NutrientLevel::VeryLow => Some(18000.0),
        NutrientLevel::Low => Some(12000.0),
        _ => None,
    }
}

fn nutrients(soil: &SoilProfile) -> [(&'static str, NutrientLevel); 3] {
    [
        ("nitrogen", soil.nutrients.nitrogen),
        ("phosphorus", soil.nutrients.phosphorus),
        ("potassium", soil.nutrients.potassium),
    ]
}

/// Build a costed improvement plan for `soil`.
pub fn improvement_plan(soil: &SoilProfile) -> SoilImprovementPlan {
    let mut plan = SoilImprovementPlan::default();

    let ph = soil.ph_range.midpoint();
    if ph < ACIDIC_PH {
        plan.immediate_actions.push(
            ImprovementAction::new("Apply agricultural lime", 8000.0, "2-3 months before planting")
                .details("2-3 tons per hectare"),
        );
    } else if ph > ALKALINE_PH {
        plan.immediate_actions.push(
            ImprovementAction::new(
                "Apply elemental sulfur or organic matter",
                6000.0,
                "3-4 months before planting",
            )
            .details("500-800 kg per hectare"),
        );
    }

    if soil.organic_matter_pct < LOW_ORGANIC_MATTER_PCT {
        plan.short_term_goals.push(
            ImprovementAction::new("Increase organic matter content", 15000.0, "1-2 years")
                .details(format!(
                    "Increase from {}% to {}%",
                    soil.organic_matter_pct, TARGET_ORGANIC_MATTER_PCT
                ))
                .methods(&[
                    "Compost application",
                    "Green manuring",
                    "Crop residue incorporation",
                ]),
        );
    }

    for (nutrient, level) in nutrients(soil) {
        if let Some(cost) = fertilizer_cost(level) {
            plan.immediate_actions.push(ImprovementAction::new(
                format!("Apply {} fertilizers", nutrient),
                cost,
                "Before each season",
            ));
        }
    }

    if soil.drainage == Drainage::Poor {
        plan.long_term_strategies.push(
            ImprovementAction::new("Install drainage systems", 50000.0, "1-2 seasons")
                .details("Subsurface drainage or raised beds to prevent waterlogging"),
        );
    }

    if soil.erosion_risk.is_severe() {
        plan.immediate_actions.push(
            ImprovementAction::new(
                "Implement erosion control measures",
                25000.0,
                "Immediate implementation needed",
            )
            .methods(&["Contour farming", "Terracing", "Cover crops"]),
        );
    }

    plan
}

/// Major problems of a soil, most fundamental first.
pub fn soil_concerns(soil: &SoilProfile) -> Vec<String> {
    let mut concerns = Vec::new();

    if soil.organic_matter_pct < CRITICAL_ORGANIC_MATTER_PCT {
        concerns.push("Low organic matter content".to_string());
    }
    if soil.erosion_risk.is_severe() {
        concerns.push("High erosion risk".to_string());
    }
    if soil.salinity == SalinityLevel::High {
        concerns.push("Soil salinity problems".to_string());
    }
    if soil.drainage == Drainage::Poor {
        concerns.push("Poor drainage and waterlogging".to_string());
    }

    concerns
}

pub fn improvement_priorities(soil: &SoilProfile) -> Vec<String> {
    let mut priorities = Vec::new();

    if soil.organic_matter_pct < CRITICAL_ORGANIC_MATTER_PCT {
        priorities.push("Increase organic matter through composting".to_string());
    }
    if soil.erosion_risk.is_severe() {
        priorities.push("Implement erosion control measures".to_string());
    }
    if soil.drainage == Drainage::Poor {
        priorities.push("Improve field drainage systems".to_string());
    }

    let deficient: Vec<String> = nutrients(soil)
        .iter()
        .filter(|(_, level)| level.is_deficient())
        .map(|(name, _)| name.to_uppercase())
        .collect();
    if !deficient.is_empty() {
        priorities.push(format!("Address {} deficiency", deficient.join(", ")));
    }

    priorities
}
