//! The read-only food catalog.

use super::types::{Category, FoodItem};
use crate::error::{PlanError, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Food items partitioned by category.
///
/// Items are validated on construction and never change afterwards.
/// Plans hold `Arc` handles to the items, so a catalog can be shared by
/// any number of concurrent evaluations without locking.
///
/// # Examples
///
/// ```
/// use u_dietplan::catalog::{Category, FoodCatalog, FoodItem, Nutrients};
///
/// let catalog = FoodCatalog::new([
///     FoodItem::new("rice", Category::Staple, Nutrients::new(200.0, 4.0, 0.5, 5.0)),
///     FoodItem::new("apple", Category::Fruit, Nutrients::new(95.0, 0.5, 0.3, 2.0)),
/// ])
/// .unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.items(Category::Fruit).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    by_category: [Vec<Arc<FoodItem>>; 5],
    by_name: HashMap<String, Arc<FoodItem>>,
}

impl FoodCatalog {
    /// Builds a catalog, validating every item.
    ///
    /// Fails with [`PlanError::InvalidFood`] on an invalid item or a
    /// duplicate name. Empty categories are allowed here; they are
    /// rejected when a slot schema that needs them is checked.
    pub fn new<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = FoodItem>,
    {
        let mut catalog = Self::default();
        for item in items {
            item.validate()?;
            if catalog.by_name.contains_key(&item.name) {
                return Err(PlanError::InvalidFood {
                    name: item.name,
                    reason: "duplicate name".into(),
                });
            }
            let item = Arc::new(item);
            catalog
                .by_name
                .insert(item.name.clone(), Arc::clone(&item));
            catalog.by_category[item.category.index()].push(item);
        }
        Ok(catalog)
    }

    /// Items of one category, in insertion order.
    pub fn items(&self, category: Category) -> &[Arc<FoodItem>] {
        &self.by_category[category.index()]
    }

    /// Looks up an item by name.
    pub fn get(&self, name: &str) -> Option<&Arc<FoodItem>> {
        self.by_name.get(name)
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All items, grouped by category in [`Category::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<FoodItem>> {
        self.by_category.iter().flatten()
    }

    /// Fails with [`PlanError::EmptyCategory`] for the first category in
    /// `categories` that has no items.
    pub fn require_categories<I>(&self, categories: I) -> Result<()>
    where
        I: IntoIterator<Item = Category>,
    {
        for category in categories {
            if self.items(category).is_empty() {
                return Err(PlanError::EmptyCategory(category));
            }
        }
        Ok(())
    }

    /// Draws a uniformly random item of `category`.
    pub fn sample<R: Rng>(&self, category: Category, rng: &mut R) -> Result<Arc<FoodItem>> {
        self.items(category)
            .choose(rng)
            .cloned()
            .ok_or(PlanError::EmptyCategory(category))
    }

    /// Draws a uniformly random item of `category` that carries none of
    /// the `forbidden` allergens.
    ///
    /// When every item of the category is tagged with a forbidden
    /// allergen, falls back to [`sample`](Self::sample) over the whole
    /// category; the fitness penalty then handles the violation.
    pub fn sample_avoiding<R: Rng>(
        &self,
        category: Category,
        forbidden: &BTreeSet<String>,
        rng: &mut R,
    ) -> Result<Arc<FoodItem>> {
        if forbidden.is_empty() {
            return self.sample(category, rng);
        }
        let safe: Vec<&Arc<FoodItem>> = self
            .items(category)
            .iter()
            .filter(|item| !item.contains_any(forbidden))
            .collect();
        match safe.choose(rng) {
            Some(item) => Ok(Arc::clone(item)),
            None => {
                log::warn!(
                    "no {category} item avoids {forbidden:?}; sampling from the full category"
                );
                self.sample(category, rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Nutrients;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(name: &str, category: Category) -> FoodItem {
        FoodItem::new(name, category, Nutrients::new(100.0, 5.0, 2.0, 50.0))
    }

    #[test]
    fn test_partition_by_category() {
        let catalog = FoodCatalog::new([
            item("rice", Category::Staple),
            item("bread", Category::Staple),
            item("apple", Category::Fruit),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.items(Category::Staple).len(), 2);
        assert_eq!(catalog.items(Category::Fruit).len(), 1);
        assert!(catalog.items(Category::Side).is_empty());
        assert_eq!(catalog.get("bread").unwrap().category, Category::Staple);
        assert!(catalog.get("cake").is_none());
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = FoodCatalog::new([item("rice", Category::Staple), item("rice", Category::Side)])
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidFood { ref reason, .. } if reason == "duplicate name"));
    }

    #[test]
    fn test_sample_empty_category() {
        let catalog = FoodCatalog::new([item("rice", Category::Staple)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            catalog.sample(Category::Vegetable, &mut rng).unwrap_err(),
            PlanError::EmptyCategory(Category::Vegetable)
        );
        assert_eq!(
            catalog.require_categories(Category::ALL).unwrap_err(),
            PlanError::EmptyCategory(Category::Side)
        );
        assert!(catalog.require_categories([Category::Staple]).is_ok());
    }

    #[test]
    fn test_sample_is_roughly_uniform() {
        let catalog = FoodCatalog::new([
            item("a", Category::Side),
            item("b", Category::Side),
            item("c", Category::Side),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..3000 {
            let food = catalog.sample(Category::Side, &mut rng).unwrap();
            *counts.entry(food.name.clone()).or_default() += 1;
        }
        assert_eq!(counts.len(), 3);
        for (name, c) in &counts {
            assert!(*c > 800, "{name} drawn only {c} times");
        }
    }

    #[test]
    fn test_sample_avoiding_skips_forbidden() {
        let catalog = FoodCatalog::new([
            item("peanut bar", Category::Complement).with_allergen("nuts"),
            item("yogurt", Category::Complement).with_allergen("dairy"),
            item("jelly", Category::Complement),
        ])
        .unwrap();
        let forbidden: BTreeSet<String> = ["nuts".to_string(), "dairy".to_string()].into();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let food = catalog
                .sample_avoiding(Category::Complement, &forbidden, &mut rng)
                .unwrap();
            assert_eq!(food.name, "jelly");
        }
    }

    #[test]
    fn test_sample_avoiding_falls_back() {
        let catalog =
            FoodCatalog::new([item("peanut bar", Category::Complement).with_allergen("nuts")])
                .unwrap();
        let forbidden: BTreeSet<String> = ["nuts".to_string()].into();
        let mut rng = StdRng::seed_from_u64(1);

        let food = catalog
            .sample_avoiding(Category::Complement, &forbidden, &mut rng)
            .unwrap();
        assert_eq!(food.name, "peanut bar");
    }

    #[test]
    fn test_samples_share_catalog_items() {
        let catalog = FoodCatalog::new([item("rice", Category::Staple)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let food = catalog.sample(Category::Staple, &mut rng).unwrap();
        assert!(Arc::ptr_eq(&food, &catalog.items(Category::Staple)[0]));
    }
}
