//! Core trait definitions for the GA engine.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the evolutionary loop and a concrete problem such as
//! [`MealPlanProblem`](crate::planner::MealPlanProblem).
//!
//! Fitness is an `f64` where **higher is better**.

use crate::error::Result;
use rand::Rng;

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The engine calls
/// [`GaProblem::evaluate`] to compute fitness, then stores it via
/// [`set_fitness`](Individual::set_fitness).
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct MySolution {
///     genes: Vec<u8>,
///     fitness: f64,
/// }
///
/// impl Individual for MySolution {
///     fn fitness(&self) -> f64 { self.fitness }
///     fn set_fitness(&mut self, f: f64) { self.fitness = f; }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Returns the cached fitness (higher is better).
    fn fitness(&self) -> f64;

    /// Stores the fitness computed by the engine.
    fn set_fitness(&mut self, fitness: f64);
}

/// Defines a GA optimization problem.
///
/// Covers:
///
/// 1. **Validation**: startup checks run before any generation
/// 2. **Initialization**: how to create random individuals
/// 3. **Evaluation**: how to compute fitness
/// 4. **Crossover**: how to recombine two parents into one child
/// 5. **Mutation**: how to perturb a child, given a per-gene rate
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the engine may evaluate
/// individuals in parallel using rayon (feature `parallel`).
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Checks that the problem can produce and score individuals.
    ///
    /// Called once by the controller before the population is created.
    /// The default implementation accepts everything.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<Self::Individual>;

    /// Evaluates an individual. Must be pure: same input, same output.
    fn evaluate(&self, individual: &Self::Individual) -> Result<f64>;

    /// Produces one child by recombining two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates a child in place, changing each gene with probability `rate`.
    fn mutate<R: Rng>(
        &self,
        individual: &mut Self::Individual,
        rate: f64,
        rng: &mut R,
    ) -> Result<()>;
}
