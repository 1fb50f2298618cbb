//! Slot layout of a weekly plan and the categories legal in each slot.

use crate::catalog::{Category, FoodCatalog};
use crate::error::{PlanError, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Days in a plan.
pub const DAYS: usize = 7;

/// Meals per day.
pub const MEALS_PER_DAY: usize = 3;

/// Slots in a plan (`DAYS * MEALS_PER_DAY`).
pub const SLOT_COUNT: usize = DAYS * MEALS_PER_DAY;

/// Meal of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SlotRole {
    Breakfast,
    Lunch,
    Dinner,
}

impl SlotRole {
    pub const ALL: [SlotRole; MEALS_PER_DAY] =
        [SlotRole::Breakfast, SlotRole::Lunch, SlotRole::Dinner];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotRole::Breakfast => "breakfast",
            SlotRole::Lunch => "lunch",
            SlotRole::Dinner => "dinner",
        };
        f.write_str(name)
    }
}

/// Flat position of a (day, role) pair. Days are 1-based.
///
/// # Panics
/// Panics if `day` is outside `1..=7`.
pub fn position(day: u8, role: SlotRole) -> usize {
    match checked_position(day, role) {
        Some(pos) => pos,
        None => panic!("day must be in 1..=7, got {day}"),
    }
}

/// Like [`position`], but `None` for a day outside `1..=7`.
pub fn checked_position(day: u8, role: SlotRole) -> Option<usize> {
    (1..=DAYS as u8)
        .contains(&day)
        .then(|| (day as usize - 1) * MEALS_PER_DAY + role.index())
}

/// Inverse of [`position`].
///
/// # Panics
/// Panics if `position >= SLOT_COUNT`.
pub fn day_role(position: usize) -> (u8, SlotRole) {
    assert!(position < SLOT_COUNT, "slot position out of range: {position}");
    (
        (position / MEALS_PER_DAY + 1) as u8,
        SlotRole::ALL[position % MEALS_PER_DAY],
    )
}

/// Categories legal at each of the 21 slot positions.
///
/// The default schema gives every day one staple:
///
/// | role      | categories          |
/// |-----------|---------------------|
/// | breakfast | fruit, complement   |
/// | lunch     | staple              |
/// | dinner    | side, vegetable     |
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSchema {
    slots: Vec<Vec<Category>>,
}

impl Default for SlotSchema {
    fn default() -> Self {
        Self::from_role(|role| match role {
            SlotRole::Breakfast => vec![Category::Fruit, Category::Complement],
            SlotRole::Lunch => vec![Category::Staple],
            SlotRole::Dinner => vec![Category::Side, Category::Vegetable],
        })
    }
}

impl SlotSchema {
    /// Builds a schema from a per-(day, role) rule.
    ///
    /// Duplicates are removed; an empty category list is an
    /// [`InvalidConfig`](PlanError::InvalidConfig) error.
    pub fn from_fn<F>(mut rule: F) -> Result<Self>
    where
        F: FnMut(u8, SlotRole) -> Vec<Category>,
    {
        let mut slots = Vec::with_capacity(SLOT_COUNT);
        for pos in 0..SLOT_COUNT {
            let (day, role) = day_role(pos);
            let mut categories = rule(day, role);
            categories.sort();
            categories.dedup();
            if categories.is_empty() {
                return Err(PlanError::InvalidConfig(format!(
                    "slot day {day} {role} admits no category"
                )));
            }
            slots.push(categories);
        }
        Ok(Self { slots })
    }

    /// Every slot admits the same categories.
    pub fn uniform(categories: &[Category]) -> Result<Self> {
        Self::from_fn(|_, _| categories.to_vec())
    }

    fn from_role<F>(rule: F) -> Self
    where
        F: Fn(SlotRole) -> Vec<Category>,
    {
        let slots = (0..SLOT_COUNT)
            .map(|pos| rule(SlotRole::ALL[pos % MEALS_PER_DAY]))
            .collect();
        Self { slots }
    }

    /// Categories legal at `position`; empty past the last slot.
    pub fn allowed(&self, position: usize) -> &[Category] {
        self.slots.get(position).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_allowed(&self, position: usize, category: Category) -> bool {
        self.slots
            .get(position)
            .is_some_and(|cats| cats.contains(&category))
    }

    /// Every category used by some slot.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Checks the shape: exactly [`SLOT_COUNT`] slots, none empty.
    ///
    /// Schemas built by [`from_fn`](Self::from_fn) always pass; a
    /// deserialized one may not.
    pub fn validate(&self) -> Result<()> {
        if self.slots.len() != SLOT_COUNT {
            return Err(PlanError::InvalidConfig(format!(
                "slot schema must have {SLOT_COUNT} slots, found {}",
                self.slots.len()
            )));
        }
        if let Some(pos) = self.slots.iter().position(Vec::is_empty) {
            let (day, role) = day_role(pos);
            return Err(PlanError::InvalidConfig(format!(
                "slot day {day} {role} admits no category"
            )));
        }
        Ok(())
    }

    /// Checks the shape and that the catalog can fill every slot.
    pub fn validate_against(&self, catalog: &FoodCatalog) -> Result<()> {
        self.validate()?;
        catalog.require_categories(self.categories())
    }
}
