//! Random slot generation: category choice, item draw and portion.

use super::individual::Slot;
use super::schema::{checked_position, day_role, SlotSchema};
use crate::catalog::{Category, FoodCatalog, FoodItem};
use crate::error::{PlanError, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Closed range of portion multipliers applied to a slot's food.
///
/// `PortionRange::fixed(1.0)` (the default) means every slot is exactly
/// one serving.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortionRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PortionRange {
    fn default() -> Self {
        Self::fixed(1.0)
    }
}

impl PortionRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn fixed(portion: f64) -> Self {
        Self::new(portion, portion)
    }

    /// `0 < min <= max`, both finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max)
        {
            return Err(PlanError::InvalidConfig(format!(
                "portion range must satisfy 0 < min <= max, got {}..={}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, portion: f64) -> bool {
        portion >= self.min && portion <= self.max
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.min < self.max {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Draws slots for a given catalog and schema.
///
/// When `avoid` is set, items carrying any of those allergens are skipped
/// unless a category has nothing else to offer.
#[derive(Debug, Clone, Copy)]
pub struct SlotSampler<'a> {
    catalog: &'a FoodCatalog,
    schema: &'a SlotSchema,
    portions: PortionRange,
    avoid: Option<&'a BTreeSet<String>>,
}

impl<'a> SlotSampler<'a> {
    pub fn new(catalog: &'a FoodCatalog, schema: &'a SlotSchema) -> Self {
        Self {
            catalog,
            schema,
            portions: PortionRange::default(),
            avoid: None,
        }
    }

    pub fn with_portions(mut self, portions: PortionRange) -> Self {
        self.portions = portions;
        self
    }

    pub fn avoiding(mut self, allergens: &'a BTreeSet<String>) -> Self {
        self.avoid = Some(allergens);
        self
    }

    pub fn schema(&self) -> &'a SlotSchema {
        self.schema
    }

    pub fn catalog(&self) -> &'a FoodCatalog {
        self.catalog
    }

    /// A fresh slot for `position`: a legal category chosen uniformly,
    /// then an item of that category and a portion.
    pub fn sample_slot<R: Rng>(&self, position: usize, rng: &mut R) -> Result<Slot> {
        let (day, role) = day_role(position);
        let category = *self
            .schema
            .allowed(position)
            .choose(rng)
            .ok_or_else(|| {
                PlanError::InvalidConfig(format!("slot {position} admits no category"))
            })?;
        Ok(Slot {
            day,
            role,
            food: self.draw(category, rng)?,
            portion: self.portions.sample(rng),
        })
    }

    /// Replaces `slot` with a fresh draw for its (day, role) position:
    /// a legal category, an item and a portion, independent of the old
    /// contents.
    ///
    /// Fails with [`PlanError::InvalidIndividual`] if the slot's day is
    /// outside `1..=7`.
    pub fn resample<R: Rng>(&self, slot: &mut Slot, rng: &mut R) -> Result<()> {
        let position = checked_position(slot.day, slot.role).ok_or_else(|| {
            PlanError::InvalidIndividual(format!("slot has day {}", slot.day))
        })?;
        *slot = self.sample_slot(position, rng)?;
        Ok(())
    }

    fn draw<R: Rng>(&self, category: Category, rng: &mut R) -> Result<Arc<FoodItem>> {
        match self.avoid {
            Some(forbidden) => self.catalog.sample_avoiding(category, forbidden, rng),
            None => self.catalog.sample(category, rng),
        }
    }
}
