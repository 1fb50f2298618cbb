//! Generation-to-generation population handling.
//!
//! [`PopulationManager`] owns the breeding policy: ranking, survival of
//! the top K, elitism, crossover and mutation. Populations are plain
//! `Vec`s kept ranked best-first.

use super::config::EvolutionConfig;
use super::selection::ParentSelection;
use super::types::{GaProblem, Individual};
use crate::error::{PlanError, Result};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Breeds successive generations of a fixed size.
#[derive(Debug, Clone)]
pub struct PopulationManager {
    population_size: usize,
    survival_count: usize,
    elite_count: usize,
    mutation_rate: f64,
    selection: ParentSelection,
    parallel: bool,
}

impl PopulationManager {
    /// Creates a manager from a validated configuration.
    ///
    /// Fails with [`PlanError::PopulationUnderflow`] if the survival count
    /// is below 2, or [`PlanError::InvalidConfig`] for other problems.
    pub fn new(config: &EvolutionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            population_size: config.population_size,
            survival_count: config.survival_count,
            elite_count: config.elite_count,
            mutation_rate: config.mutation_rate,
            selection: config.selection,
            parallel: config.parallel,
        })
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Whether evaluation is requested on the rayon pool.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Creates, evaluates and ranks the initial population.
    pub fn initialize<P, R>(&self, problem: &P, rng: &mut R) -> Result<Vec<P::Individual>>
    where
        P: GaProblem,
        R: Rng,
    {
        let mut population = (0..self.population_size)
            .map(|_| problem.create_individual(rng))
            .collect::<Result<Vec<_>>>()?;
        self.evaluate(problem, &mut population)?;
        rank(&mut population);
        Ok(population)
    }

    /// Evaluates every individual and stores its fitness.
    ///
    /// With the `parallel` feature and `parallel = true`, evaluation runs
    /// on the rayon pool and returns only after every individual is done.
    pub fn evaluate<P: GaProblem>(&self, problem: &P, members: &mut [P::Individual]) -> Result<()> {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                return members.par_iter_mut().try_for_each(|ind| {
                    let f = problem.evaluate(ind)?;
                    ind.set_fitness(f);
                    Ok::<(), PlanError>(())
                });
            }
        }

        for ind in members.iter_mut() {
            let f = problem.evaluate(ind)?;
            ind.set_fitness(f);
        }
        Ok(())
    }

    /// The top-K breeding pool of a ranked population.
    ///
    /// Fails with [`PlanError::PopulationUnderflow`] if fewer than two
    /// individuals would survive.
    pub fn survivors<'a, I: Individual>(&self, ranked: &'a [I]) -> Result<&'a [I]> {
        let k = self.survival_count.min(ranked.len());
        if k < 2 {
            return Err(PlanError::PopulationUnderflow {
                survival_count: k,
                population_size: ranked.len(),
            });
        }
        Ok(&ranked[..k])
    }

    /// Produces the next generation from a ranked population.
    ///
    /// Elites are copied verbatim; every other member is a child of two
    /// distinct survivors, crossed over and then mutated. Children are
    /// evaluated and the returned population is ranked.
    pub fn next_generation<P, R>(
        &self,
        problem: &P,
        ranked: &[P::Individual],
        rng: &mut R,
    ) -> Result<Vec<P::Individual>>
    where
        P: GaProblem,
        R: Rng,
    {
        let pool = self.survivors(ranked)?;
        let elite_count = self.elite_count.min(ranked.len());

        let mut next_gen: Vec<P::Individual> = Vec::with_capacity(self.population_size);
        next_gen.extend_from_slice(&ranked[..elite_count]);

        while next_gen.len() < self.population_size {
            let (i, j) = self.selection.select_pair(pool.len(), rng);
            let mut child = problem.crossover(&pool[i], &pool[j], rng);
            problem.mutate(&mut child, self.mutation_rate, rng)?;
            next_gen.push(child);
        }

        // Elites keep their fitness; only children need scoring.
        self.evaluate(problem, &mut next_gen[elite_count..])?;
        rank(&mut next_gen);
        Ok(next_gen)
    }
}

/// Sorts a population best-first (highest fitness first).
pub fn rank<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

/// Mean fitness, or `NaN` for an empty population.
pub fn average_fitness<I: Individual>(population: &[I]) -> f64 {
    population.iter().map(Individual::fitness).sum::<f64>() / population.len() as f64
}
