//! Random catalog generation for demos, benchmarks and tests.

use super::store::FoodCatalog;
use super::types::{Category, FoodItem, Nutrients};
use crate::error::{PlanError, Result};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Generator for a random food catalog.
///
/// Produces `items_per_category` items in each of the five categories,
/// named `<category>_<i>`. Nutrient values per item:
///
/// | nutrient | range |
/// |----------|-------|
/// | calories | 50–300 kcal (whole numbers) |
/// | protein  | 2–20 g |
/// | fat      | 1–15 g |
/// | sodium   | 10–400 mg (whole numbers) |
///
/// Each item gets 0–2 allergen tags drawn with replacement from
/// `allergen_pool`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_dietplan::catalog::SyntheticCatalog;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let catalog = SyntheticCatalog::new(20).generate(&mut rng).unwrap();
/// assert_eq!(catalog.len(), 100);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntheticCatalog {
    pub items_per_category: usize,
    pub allergen_pool: Vec<String>,
}

impl Default for SyntheticCatalog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl SyntheticCatalog {
    /// Generator with the default allergen pool (nuts, gluten, soy, dairy).
    pub fn new(items_per_category: usize) -> Self {
        Self {
            items_per_category,
            allergen_pool: ["nuts", "gluten", "soy", "dairy"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Replaces the allergen pool. An empty pool yields allergen-free items.
    pub fn with_allergen_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergen_pool = pool.into_iter().map(Into::into).collect();
        self
    }

    /// Generates the catalog.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<FoodCatalog> {
        if self.items_per_category == 0 {
            return Err(PlanError::InvalidConfig(
                "items_per_category must be at least 1".into(),
            ));
        }

        let mut items = Vec::with_capacity(self.items_per_category * Category::ALL.len());
        for category in Category::ALL {
            for i in 0..self.items_per_category {
                let nutrients = Nutrients {
                    calories: rng.random_range(50..=300) as f64,
                    protein: rng.random_range(2.0..20.0),
                    fat: rng.random_range(1.0..15.0),
                    sodium: rng.random_range(10..=400) as f64,
                };
                let tag_count = rng.random_range(0..=2);
                let tags: Vec<String> = (0..tag_count)
                    .filter_map(|_| self.allergen_pool.choose(rng).cloned())
                    .collect();
                items.push(
                    FoodItem::new(format!("{category}_{i}"), category, nutrients)
                        .with_allergens(tags),
                );
            }
        }

        log::debug!(
            "generated synthetic catalog: {} items per category",
            self.items_per_category
        );
        FoodCatalog::new(items)
    }
}
