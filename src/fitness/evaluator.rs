//! Plan scoring.
//!
//! The score combines three terms, higher is better:
//!
//! ```text
//! fitness = diversity_bonus - deviation_weight * Σ err(n) - hits * allergen_penalty
//! ```
//!
//! - `err(n)` is the relative error `|total - target| / target` of each
//!   nutrient, taken as-is ([`DeviationMetric::Absolute`]) or squared
//!   ([`DeviationMetric::Squared`]). Summing over nutrients makes a plan
//!   that misses several targets worse than one that misses a single
//!   target by the same amount.
//! - `hits` counts slots whose food carries a forbidden allergen.
//! - `diversity_bonus = goal.diversity_weight * weights.diversity *
//!   distinct_foods / 21`.

use super::goal::Goal;
use crate::catalog::{Nutrient, Nutrients};
use crate::error::{PlanError, Result};
use crate::plan::{day_role, MealPlan, SlotSchema, SLOT_COUNT};

/// How a relative error turns into a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviationMetric {
    /// `|err|`.
    #[default]
    Absolute,
    /// `err²`. Tolerates small misses, punishes large ones harder.
    Squared,
}

impl DeviationMetric {
    fn apply(self, relative_error: f64) -> f64 {
        match self {
            DeviationMetric::Absolute => relative_error.abs(),
            DeviationMetric::Squared => relative_error * relative_error,
        }
    }
}

/// Relative weights of the fitness terms.
///
/// One more distinct food raises the score by at most
/// `goal.diversity_weight * diversity / 21`. That step must stay below
/// `allergen_penalty`, or swapping in a new allergen-tagged item can pay
/// off; the planner rejects such combinations at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessWeights {
    /// Multiplier on the summed nutrient deviation.
    pub deviation: f64,
    /// Penalty per slot holding a forbidden allergen.
    pub allergen_penalty: f64,
    /// Multiplier on the diversity bonus (on top of the goal's weight).
    pub diversity: f64,
    pub metric: DeviationMetric,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            deviation: 1.0,
            allergen_penalty: 10.0,
            diversity: 1.0,
            metric: DeviationMetric::Absolute,
        }
    }
}

impl FitnessWeights {
    pub fn with_allergen_penalty(mut self, penalty: f64) -> Self {
        self.allergen_penalty = penalty;
        self
    }

    pub fn with_metric(mut self, metric: DeviationMetric) -> Self {
        self.metric = metric;
        self
    }

    /// All weights must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("deviation", self.deviation),
            ("allergen_penalty", self.allergen_penalty),
            ("diversity", self.diversity),
        ] {
            if !(w.is_finite() && w >= 0.0) {
                return Err(PlanError::InvalidConfig(format!(
                    "fitness weight `{name}` must be non-negative, got {w}"
                )));
            }
        }
        Ok(())
    }
}

/// Weekly total vs. target for one nutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NutrientDeviation {
    pub nutrient: Nutrient,
    pub total: f64,
    pub target: f64,
    /// `|total - target| / target`.
    pub relative_error: f64,
}

/// Per-term decomposition of a fitness value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessBreakdown {
    pub totals: Nutrients,
    /// In [`Nutrient::ALL`] order.
    pub deviations: [NutrientDeviation; 4],
    pub deviation_penalty: f64,
    pub allergen_hits: usize,
    pub allergen_penalty: f64,
    pub distinct_foods: usize,
    pub diversity_bonus: f64,
}

impl FitnessBreakdown {
    pub fn deviation(&self, nutrient: Nutrient) -> &NutrientDeviation {
        &self.deviations[nutrient as usize]
    }
}

/// Result of [`FitnessEvaluator::evaluate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    pub fitness: f64,
    pub breakdown: FitnessBreakdown,
}

/// Scores plans for a slot schema.
///
/// Evaluation is a pure function of the plan and the goal. The goal is
/// expected to have passed [`Goal::validate`]; zero targets would make
/// the relative errors infinite.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    schema: &'a SlotSchema,
    weights: FitnessWeights,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(schema: &'a SlotSchema, weights: FitnessWeights) -> Self {
        Self { schema, weights }
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Checks the slot invariants: 21 slots, each at its own (day, role),
    /// each holding a category legal there with a positive finite portion.
    pub fn validate(&self, plan: &MealPlan) -> Result<()> {
        if plan.len() != SLOT_COUNT {
            return Err(PlanError::InvalidIndividual(format!(
                "expected {SLOT_COUNT} slots, found {}",
                plan.len()
            )));
        }
        for (pos, slot) in plan.slots().iter().enumerate() {
            let (day, role) = day_role(pos);
            if (slot.day, slot.role) != (day, role) {
                return Err(PlanError::InvalidIndividual(format!(
                    "slot {pos} is labelled day {} {} but sits at day {day} {role}",
                    slot.day, slot.role
                )));
            }
            if !self.schema.is_allowed(pos, slot.food.category) {
                return Err(PlanError::InvalidIndividual(format!(
                    "day {day} {role} cannot hold {} item `{}`",
                    slot.food.category, slot.food.name
                )));
            }
            if !(slot.portion.is_finite() && slot.portion > 0.0) {
                return Err(PlanError::InvalidIndividual(format!(
                    "day {day} {role} has portion {}",
                    slot.portion
                )));
            }
        }
        Ok(())
    }

    /// Scores `plan` against `goal`.
    ///
    /// Fails with [`PlanError::InvalidIndividual`] if the plan breaks its
    /// slot invariants.
    pub fn evaluate(&self, plan: &MealPlan, goal: &Goal) -> Result<Evaluation> {
        self.validate(plan)?;

        let totals = plan.totals();
        let deviations = Nutrient::ALL.map(|nutrient| {
            let total = totals.get(nutrient);
            let target = goal.targets.get(nutrient);
            NutrientDeviation {
                nutrient,
                total,
                target,
                relative_error: (total - target).abs() / target,
            }
        });
        let deviation_penalty = self.weights.deviation
            * deviations
                .iter()
                .map(|d| self.weights.metric.apply(d.relative_error))
                .sum::<f64>();

        let allergen_hits = plan
            .slots()
            .iter()
            .filter(|slot| slot.food.contains_any(&goal.forbidden_allergens))
            .count();
        let allergen_penalty = allergen_hits as f64 * self.weights.allergen_penalty;

        let distinct_foods = plan.distinct_foods();
        let diversity_bonus = goal.diversity_weight
            * self.weights.diversity
            * distinct_foods as f64
            / SLOT_COUNT as f64;

        Ok(Evaluation {
            fitness: diversity_bonus - deviation_penalty - allergen_penalty,
            breakdown: FitnessBreakdown {
                totals,
                deviations,
                deviation_penalty,
                allergen_hits,
                allergen_penalty,
                distinct_foods,
                diversity_bonus,
            },
        })
    }
}
