//! The candidate weekly plan.

use super::sampler::SlotSampler;
use super::schema::{checked_position, SlotRole, MEALS_PER_DAY, SLOT_COUNT};
use crate::catalog::{FoodItem, Nutrients};
use crate::error::Result;
use crate::ga::Individual;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// One meal: a food item at a (day, role) position with a portion factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub day: u8,
    pub role: SlotRole,
    pub food: Arc<FoodItem>,
    pub portion: f64,
}

impl Slot {
    /// Food nutrients scaled by the portion.
    pub fn nutrients(&self) -> Nutrients {
        self.food.nutrients * self.portion
    }
}

/// A 7-day, 21-meal plan with its cached fitness.
///
/// Slots are stored in position order (`day 1 breakfast` first). Cloning
/// copies the slots; the food items themselves are shared, immutable
/// catalog entries, so changing a clone's slot never touches the original.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MealPlan {
    slots: Vec<Slot>,
    fitness: f64,
}

impl MealPlan {
    /// Wraps slots without checking them.
    ///
    /// Use [`FitnessEvaluator::validate`](crate::fitness::FitnessEvaluator::validate)
    /// to check the slot invariants.
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Builds a random plan: one fresh slot per position.
    pub fn create_random<R: Rng>(sampler: &SlotSampler<'_>, rng: &mut R) -> Result<Self> {
        let slots = (0..SLOT_COUNT)
            .map(|pos| sampler.sample_slot(pos, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_slots(slots))
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot at a (day, role) position; `None` for a day outside
    /// `1..=7` or an incomplete plan.
    pub fn slot(&self, day: u8, role: SlotRole) -> Option<&Slot> {
        self.slots.get(checked_position(day, role)?)
    }

    /// The 7×3 grid: `(day, [breakfast, lunch, dinner])` rows.
    pub fn days(&self) -> impl Iterator<Item = (u8, &[Slot])> {
        self.slots
            .chunks(MEALS_PER_DAY)
            .enumerate()
            .map(|(i, meals)| ((i + 1) as u8, meals))
    }

    /// Weekly nutrient totals, portions applied.
    pub fn totals(&self) -> Nutrients {
        self.slots.iter().map(Slot::nutrients).sum()
    }

    /// Number of distinct food items (by name).
    pub fn distinct_foods(&self) -> usize {
        self.slots
            .iter()
            .map(|s| s.food.name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Individual for MealPlan {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (day, meals) in self.days() {
            writeln!(f, "DAY {day}")?;
            writeln!(f, "{}", "-".repeat(30))?;
            for slot in meals {
                writeln!(
                    f,
                    "  {:<10} {:<11} {} x{:.1}",
                    slot.role.to_string(),
                    slot.food.category.to_string(),
                    slot.food.name,
                    slot.portion
                )?;
            }
        }
        Ok(())
    }
}
