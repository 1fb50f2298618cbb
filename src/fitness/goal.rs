//! User goals: weekly nutrient targets and soft preferences.

use crate::catalog::{Nutrient, Nutrients};
use crate::error::{PlanError, Result};
use crate::plan::DAYS;
use std::collections::BTreeSet;

/// What a plan should achieve.
///
/// `targets` are weekly totals. Use [`Goal::from_daily`] for per-day
/// figures.
///
/// # Examples
///
/// ```
/// use u_dietplan::catalog::Nutrients;
/// use u_dietplan::fitness::Goal;
///
/// let goal = Goal::from_daily(Nutrients::new(2000.0, 80.0, 60.0, 2000.0))
///     .with_forbidden_allergen("nuts")
///     .with_diversity_weight(0.5);
/// assert_eq!(goal.targets.calories, 14_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    pub targets: Nutrients,
    #[cfg_attr(feature = "serde", serde(default))]
    pub forbidden_allergens: BTreeSet<String>,
    pub diversity_weight: f64,
}

impl Goal {
    /// Goal with weekly targets, no forbidden allergens and diversity weight 1.0.
    pub fn new(targets: Nutrients) -> Self {
        Self {
            targets,
            forbidden_allergens: BTreeSet::new(),
            diversity_weight: 1.0,
        }
    }

    /// Goal from daily targets, scaled to a week.
    pub fn from_daily(daily: Nutrients) -> Self {
        Self::new(daily * DAYS as f64)
    }

    pub fn with_forbidden_allergen(mut self, tag: impl Into<String>) -> Self {
        self.forbidden_allergens.insert(tag.into());
        self
    }

    pub fn with_forbidden_allergens<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_allergens
            .extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_diversity_weight(mut self, weight: f64) -> Self {
        self.diversity_weight = weight;
        self
    }

    /// Targets must be finite and positive; the diversity weight finite
    /// and non-negative.
    pub fn validate(&self) -> Result<()> {
        for nutrient in Nutrient::ALL {
            let target = self.targets.get(nutrient);
            if !(target.is_finite() && target > 0.0) {
                return Err(PlanError::InvalidConfig(format!(
                    "{nutrient} target must be positive, got {target}"
                )));
            }
        }
        if !(self.diversity_weight.is_finite() && self.diversity_weight >= 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "diversity weight must be non-negative, got {}",
                self.diversity_weight
            )));
        }
        Ok(())
    }
}
