//! GA configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the evolutionary loop.

use super::selection::ParentSelection;
use crate::error::{PlanError, Result};

/// Configuration for the evolutionary loop.
///
/// Controls population size, survival and elitism, mutation rate,
/// termination conditions, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_dietplan::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.survival_count, 50);
/// assert_eq!(config.max_generations, 150);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_dietplan::ga::{EvolutionConfig, ParentSelection};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(20)
///     .with_survival_count(5)
///     .with_mutation_rate(0.1)
///     .with_stagnation(10, 0.01)
///     .with_max_generations(200)
///     .with_selection(ParentSelection::Tournament(2))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvolutionConfig {
    /// Number of individuals in each generation (N).
    pub population_size: usize,

    /// Number of top-ranked individuals kept as the breeding pool (K).
    ///
    /// Must satisfy `2 <= K < N`.
    pub survival_count: usize,

    /// Number of top individuals copied unchanged into the next generation.
    ///
    /// With at least 1, the best fitness never regresses. 0 disables elitism.
    pub elite_count: usize,

    /// Per-gene probability of replacing a child's slot with a fresh sample
    /// (0.0–1.0). Typical range: 0.05–0.10.
    pub mutation_rate: f64,

    /// How parents are drawn from the breeding pool.
    pub selection: ParentSelection,

    /// Number of generations (W) over which the best fitness must improve.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_window: usize,

    /// Minimum absolute improvement (ε) of the best fitness over the
    /// stagnation window; less than this ends the run as converged.
    pub stagnation_threshold: f64,

    /// Hard cap on the number of generations (G_max), counting the
    /// initial population as generation 0.
    pub max_generations: usize,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            survival_count: 50,
            elite_count: 1,
            mutation_rate: 0.05,
            selection: ParentSelection::default(),
            stagnation_window: 15,
            stagnation_threshold: 1e-3,
            max_generations: 150,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the survival (breeding pool) size.
    pub fn with_survival_count(mut self, k: usize) -> Self {
        self.survival_count = k;
        self
    }

    /// Sets the number of elites carried over unchanged.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_selection(mut self, selection: ParentSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the stagnation window and threshold.
    pub fn with_stagnation(mut self, window: usize, threshold: f64) -> Self {
        self.stagnation_window = window;
        self.stagnation_threshold = threshold.max(0.0);
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick plans: small population, short runs.
    ///
    /// - Population: 40, Survivors: 10, Generations: 60
    /// - Stagnation: 10 generations, threshold 0.001
    pub fn fast() -> Self {
        Self {
            population_size: 40,
            survival_count: 10,
            max_generations: 60,
            stagnation_window: 10,
            stagnation_threshold: 1e-3,
            ..Self::default()
        }
    }

    /// Preset matching the defaults.
    ///
    /// - Population: 100, Survivors: 50, Generations: 150
    /// - Stagnation: 15 generations, threshold 0.001
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for better plans at the cost of longer runs.
    ///
    /// - Population: 200, Survivors: 60, Generations: 500
    /// - Stagnation: 40 generations, threshold 0.0005
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            survival_count: 60,
            max_generations: 500,
            stagnation_window: 40,
            stagnation_threshold: 5e-4,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// A survival count below 2 is reported as
    /// [`PlanError::PopulationUnderflow`]; every other problem as
    /// [`PlanError::InvalidConfig`].
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(PlanError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.survival_count < 2 {
            return Err(PlanError::PopulationUnderflow {
                survival_count: self.survival_count,
                population_size: self.population_size,
            });
        }
        if self.survival_count >= self.population_size {
            return Err(PlanError::InvalidConfig(format!(
                "survival_count ({}) must be less than population_size ({})",
                self.survival_count, self.population_size
            )));
        }
        if self.elite_count >= self.population_size {
            return Err(PlanError::InvalidConfig(
                "elite_count too high: elites fill entire population".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(PlanError::InvalidConfig(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(self.stagnation_threshold.is_finite() && self.stagnation_threshold >= 0.0) {
            return Err(PlanError::InvalidConfig(
                "stagnation_threshold must be non-negative".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(PlanError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if let ParentSelection::Tournament(0) = self.selection {
            return Err(PlanError::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
