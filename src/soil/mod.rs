//! Soil compatibility scoring and improvement advice.

pub mod analysis;
pub mod improvement;

pub use analysis::{
    round2, score_soil_compatibility, NutrientScores, SoilAnalysis, SoilComponentScores,
    SoilDetail, SuitabilityGrade,
};
pub use improvement::{
    improvement_plan, improvement_priorities, soil_concerns, ImprovementAction,
    SoilImprovementPlan,
};
