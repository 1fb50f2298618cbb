//! Weekly plan representation.
//!
//! A [`MealPlan`] is a flat sequence of [`SLOT_COUNT`] slots, one per
//! (day, [`SlotRole`]) pair. The [`SlotSchema`] decides which food
//! categories each slot may hold; the [`SlotSampler`] draws legal slots.

mod individual;
mod sampler;
mod schema;

pub use individual::{MealPlan, Slot};
pub use sampler::{PortionRange, SlotSampler};
pub use schema::{
    checked_position, day_role, position, SlotRole, SlotSchema, DAYS, MEALS_PER_DAY,
    SLOT_COUNT,
};
