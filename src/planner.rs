//! Weekly meal planning on top of the GA engine.
//!
//! [`MealPlanProblem`] implements [`GaProblem`] for [`MealPlan`]s;
//! [`plan_week`] runs it to completion in one call.

use crate::catalog::FoodCatalog;
use crate::error::{PlanError, Result};
use crate::fitness::{Evaluation, FitnessEvaluator, FitnessWeights, Goal};
use crate::ga::{
    resample_mutation, CrossoverScheme, EvolutionConfig, EvolutionController, EvolutionResult,
    GaProblem,
};
use crate::plan::{MealPlan, PortionRange, SlotSampler, SlotSchema, SLOT_COUNT};
use rand::Rng;

/// Domain-level knobs of the meal-plan problem.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerOptions {
    pub weights: FitnessWeights,
    pub crossover: CrossoverScheme,
    pub portions: PortionRange,
    /// Skip items with forbidden allergens when drawing new slots, as long
    /// as the category has alternatives.
    pub avoid_forbidden_when_sampling: bool,
}

impl PlannerOptions {
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_crossover(mut self, crossover: CrossoverScheme) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_portions(mut self, portions: PortionRange) -> Self {
        self.portions = portions;
        self
    }

    pub fn with_allergen_avoidance(mut self, avoid: bool) -> Self {
        self.avoid_forbidden_when_sampling = avoid;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.portions.validate()
    }
}

/// The meal-plan optimization problem for one catalog, schema and goal.
#[derive(Debug, Clone, Copy)]
pub struct MealPlanProblem<'a> {
    catalog: &'a FoodCatalog,
    schema: &'a SlotSchema,
    goal: &'a Goal,
    options: PlannerOptions,
}

impl<'a> MealPlanProblem<'a> {
    pub fn new(
        catalog: &'a FoodCatalog,
        schema: &'a SlotSchema,
        goal: &'a Goal,
        options: PlannerOptions,
    ) -> Self {
        Self {
            catalog,
            schema,
            goal,
            options,
        }
    }

    pub fn goal(&self) -> &'a Goal {
        self.goal
    }

    /// The slot sampler used for initialization and mutation.
    pub fn sampler(&self) -> SlotSampler<'a> {
        let sampler =
            SlotSampler::new(self.catalog, self.schema).with_portions(self.options.portions);
        if self.options.avoid_forbidden_when_sampling {
            sampler.avoiding(&self.goal.forbidden_allergens)
        } else {
            sampler
        }
    }

    pub fn evaluator(&self) -> FitnessEvaluator<'a> {
        FitnessEvaluator::new(self.schema, self.options.weights)
    }

    /// Fitness with its per-term breakdown.
    pub fn evaluate_detailed(&self, plan: &MealPlan) -> Result<Evaluation> {
        self.evaluator().evaluate(plan, self.goal)
    }
}

impl GaProblem for MealPlanProblem<'_> {
    type Individual = MealPlan;

    /// Checks options, goal, schema shape, and that the catalog can fill
    /// every slot.
    ///
    /// With forbidden allergens, one extra distinct food must be worth
    /// less than one allergen hit, or a tagged item could outscore a safe
    /// one.
    fn validate(&self) -> Result<()> {
        self.options.validate()?;
        self.goal.validate()?;
        if !self.goal.forbidden_allergens.is_empty() {
            let weights = &self.options.weights;
            let step = self.goal.diversity_weight * weights.diversity / SLOT_COUNT as f64;
            if step >= weights.allergen_penalty {
                return Err(PlanError::InvalidConfig(format!(
                    "diversity bonus per distinct food ({step}) must be below \
                     the allergen penalty ({})",
                    weights.allergen_penalty
                )));
            }
        }
        self.schema.validate_against(self.catalog)
    }

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<MealPlan> {
        MealPlan::create_random(&self.sampler(), rng)
    }

    fn evaluate(&self, plan: &MealPlan) -> Result<f64> {
        Ok(self.evaluate_detailed(plan)?.fitness)
    }

    fn crossover<R: Rng>(&self, parent1: &MealPlan, parent2: &MealPlan, rng: &mut R) -> MealPlan {
        MealPlan::from_slots(
            self.options
                .crossover
                .apply(parent1.slots(), parent2.slots(), rng),
        )
    }

    fn mutate<R: Rng>(&self, plan: &mut MealPlan, rate: f64, rng: &mut R) -> Result<()> {
        let sampler = self.sampler();
        resample_mutation(plan.slots_mut(), rate, rng, |slot, rng| {
            sampler.resample(slot, rng)
        })?;
        Ok(())
    }
}

/// Evolves a weekly plan for `goal` and returns the best plan with the
/// fitness history.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_dietplan::catalog::{Nutrients, SyntheticCatalog};
/// use u_dietplan::fitness::Goal;
/// use u_dietplan::ga::EvolutionConfig;
/// use u_dietplan::plan::{SlotSchema, SLOT_COUNT};
/// use u_dietplan::planner::{plan_week, PlannerOptions};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let catalog = SyntheticCatalog::new(10).generate(&mut rng).unwrap();
/// let goal = Goal::from_daily(Nutrients::new(600.0, 40.0, 25.0, 900.0));
/// let config = EvolutionConfig::fast().with_seed(7);
///
/// let result = plan_week(&catalog, &SlotSchema::default(), &goal, config, PlannerOptions::default())
///     .unwrap();
/// assert_eq!(result.best.len(), SLOT_COUNT);
/// assert_eq!(result.history.len(), result.generations);
/// ```
pub fn plan_week(
    catalog: &FoodCatalog,
    schema: &SlotSchema,
    goal: &Goal,
    config: EvolutionConfig,
    options: PlannerOptions,
) -> Result<EvolutionResult<MealPlan>> {
    let problem = MealPlanProblem::new(catalog, schema, goal, options);
    EvolutionController::new(&problem, config)?.run()
}
