//! Food records: categories, nutrient vectors and allergen tags.

use crate::error::{PlanError, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

/// Food category. Each meal slot admits a subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Staple,
    Side,
    Vegetable,
    Fruit,
    Complement,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Staple,
        Category::Side,
        Category::Vegetable,
        Category::Fruit,
        Category::Complement,
    ];

    /// Lowercase name, as used in item names and serialized data.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Staple => "staple",
            Category::Side => "side",
            Category::Vegetable => "vegetable",
            Category::Fruit => "fruit",
            Category::Complement => "complement",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlanError::UnknownCategory(s.to_string()))
    }
}

/// One axis of the nutrient vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Sodium,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Sodium,
    ];

    /// Display unit (kcal, g, g, mg).
    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein | Nutrient::Fat => "g",
            Nutrient::Sodium => "mg",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Sodium => "sodium",
        };
        f.write_str(name)
    }
}

/// Nutrient vector: kcal, grams of protein and fat, milligrams of sodium.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub sodium: f64,
}

impl Nutrients {
    pub fn new(calories: f64, protein: f64, fat: f64, sodium: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            sodium,
        }
    }

    /// Value along one axis.
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Sodium => self.sodium,
        }
    }

    /// `true` if every component is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        Nutrient::ALL
            .iter()
            .all(|&n| self.get(n).is_finite() && self.get(n) >= 0.0)
    }
}

impl Add for Nutrients {
    type Output = Nutrients;

    fn add(self, rhs: Nutrients) -> Nutrients {
        Nutrients {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            sodium: self.sodium + rhs.sodium,
        }
    }
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, rhs: Nutrients) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, factor: f64) -> Nutrients {
        Nutrients {
            calories: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            sodium: self.sodium * factor,
        }
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Nutrients>>(iter: I) -> Self {
        iter.fold(Nutrients::default(), Add::add)
    }
}

/// An immutable catalog entry.
///
/// The name is the item's identity: two plans use "the same food" when
/// their slots reference items with equal names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodItem {
    pub name: String,
    pub category: Category,
    pub nutrients: Nutrients,
    #[cfg_attr(feature = "serde", serde(default))]
    pub allergens: BTreeSet<String>,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, category: Category, nutrients: Nutrients) -> Self {
        Self {
            name: name.into(),
            category,
            nutrients,
            allergens: BTreeSet::new(),
        }
    }

    /// Adds one allergen tag.
    pub fn with_allergen(mut self, tag: impl Into<String>) -> Self {
        self.allergens.insert(tag.into());
        self
    }

    /// Adds several allergen tags.
    pub fn with_allergens<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens.extend(tags.into_iter().map(Into::into));
        self
    }

    /// `true` if any of this item's tags is in `forbidden`.
    pub fn contains_any(&self, forbidden: &BTreeSet<String>) -> bool {
        !forbidden.is_empty() && !self.allergens.is_disjoint(forbidden)
    }

    /// Load-time validation: non-empty name and a valid nutrient vector.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlanError::InvalidFood {
                name: self.name.clone(),
                reason: "name must not be empty".into(),
            });
        }
        if !self.nutrients.is_valid() {
            return Err(PlanError::InvalidFood {
                name: self.name.clone(),
                reason: "nutrients must be finite and non-negative".into(),
            });
        }
        Ok(())
    }
}
