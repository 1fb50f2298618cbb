//! Weekly meal planning by genetic algorithm.
//!
//! Evolves a 7-day, 3-meals-a-day plan from a food catalog toward a weekly
//! nutrient goal while avoiding forbidden allergens and rewarding variety:
//!
//! - **Catalog**: Food items grouped by category, with nutrient vectors
//!   and allergen tags, plus a seeded synthetic generator.
//! - **Plan**: The 21-slot [`MealPlan`](plan::MealPlan) individual and the
//!   slot schema that says which categories each meal admits.
//! - **Fitness**: Goal-relative nutrient deviation, allergen penalty and
//!   diversity bonus, with tunable weights.
//! - **GA**: A generic engine (survival of the top K, elitism, positional
//!   crossover, resampling mutation, stagnation stopping) that any
//!   [`GaProblem`](ga::GaProblem) can plug into.
//! - **Planner**: Binds the meal-plan domain to the engine; see
//!   [`plan_week`].
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use u_dietplan::catalog::{Nutrients, SyntheticCatalog};
//! use u_dietplan::fitness::Goal;
//! use u_dietplan::ga::EvolutionConfig;
//! use u_dietplan::plan::SlotSchema;
//! use u_dietplan::planner::PlannerOptions;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let catalog = SyntheticCatalog::new(8).generate(&mut rng).unwrap();
//! let goal = Goal::from_daily(Nutrients::new(700.0, 35.0, 25.0, 800.0))
//!     .with_forbidden_allergen("nuts");
//!
//! let result = u_dietplan::plan_week(
//!     &catalog,
//!     &SlotSchema::default(),
//!     &goal,
//!     EvolutionConfig::fast().with_seed(1),
//!     PlannerOptions::default(),
//! )
//! .unwrap();
//! println!("{}", result.best);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluates each generation on the rayon pool.
//! - `serde`: derives `Serialize`/`Deserialize` for data and config types.

pub mod catalog;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod plan;
pub mod planner;

pub use error::{PlanError, Result};
pub use planner::plan_week;
