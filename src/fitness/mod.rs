//! Fitness evaluation of weekly plans.
//!
//! - [`Goal`]: nutrient targets, forbidden allergens, diversity weight
//! - [`FitnessEvaluator`]: pure scoring function with a per-term
//!   [`FitnessBreakdown`]
//! - [`FitnessWeights`]: tunable balance between deviation, allergen
//!   penalty and diversity bonus

mod evaluator;
mod goal;

pub use evaluator::{
    DeviationMetric, Evaluation, FitnessBreakdown, FitnessEvaluator, FitnessWeights,
    NutrientDeviation,
};
pub use goal::Goal;
