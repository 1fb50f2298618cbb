//! Food reference data.
//!
//! - [`FoodItem`]: immutable record with a [`Category`], a [`Nutrients`]
//!   vector and allergen tags
//! - [`FoodCatalog`]: items partitioned by category, sampled uniformly
//! - [`SyntheticCatalog`]: random catalog generator

mod store;
mod synthetic;
mod types;

pub use store::FoodCatalog;
pub use synthetic::SyntheticCatalog;
pub use types::{Category, FoodItem, Nutrient, Nutrients};
