//! GA evolutionary loop execution.
//!
//! [`EvolutionController`] orchestrates the complete evolutionary process:
//! initialization → evaluation → record → stopping check → breeding → repeat.

use super::config::EvolutionConfig;
use super::population::{average_fitness, PopulationManager};
use super::stopping::StagnationMonitor;
use super::types::{GaProblem, Individual};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle of a run.
///
/// `Initializing → Evolving → {Converged, Exhausted, Cancelled}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Building and scoring the initial population.
    Initializing,
    /// Running generations.
    Evolving,
    /// Stopped because the best fitness stagnated.
    Converged,
    /// Stopped at `max_generations`.
    Exhausted,
    /// Stopped at a generation boundary by the cancellation token.
    Cancelled,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Converged | RunState::Exhausted | RunState::Cancelled
        )
    }
}

/// Fitness statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessRecord {
    /// 0 for the initial population.
    pub generation: usize,
    /// Best fitness in this generation's population.
    pub best_fitness: f64,
    /// Mean fitness of this generation's population.
    pub average_fitness: f64,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<I: Individual> {
    /// The best individual observed during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Terminal state: `Converged`, `Exhausted` or `Cancelled`.
    pub state: RunState,

    /// Number of generations run, including generation 0.
    pub generations: usize,

    /// One record per generation, in order; `history.len() == generations`.
    pub history: Vec<FitnessRecord>,
}

/// Executes the evolutionary loop for one problem.
///
/// Configuration and problem checks run in [`new`](Self::new), so a
/// misconfiguration fails before any individual is created.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = EvolutionConfig::default().with_seed(42);
/// let result = EvolutionController::new(&problem, config)?.run()?;
/// println!("best fitness: {}", result.best_fitness);
/// ```
pub struct EvolutionController<'p, P: GaProblem> {
    problem: &'p P,
    config: EvolutionConfig,
    manager: PopulationManager,
    cancel: Option<Arc<AtomicBool>>,
    state: RunState,
}

impl<'p, P: GaProblem> EvolutionController<'p, P> {
    /// Validates `config` and `problem` and prepares a run.
    pub fn new(problem: &'p P, config: EvolutionConfig) -> Result<Self> {
        let manager = PopulationManager::new(&config)?;
        problem.validate()?;
        Ok(Self {
            problem,
            config,
            manager,
            cancel: None,
            state: RunState::Initializing,
        })
    }

    /// Adds a cancellation token.
    ///
    /// When the flag is set, the run stops at the next generation boundary
    /// and returns the best individual found so far.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Current lifecycle state; terminal after [`run`](Self::run).
    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Runs to a terminal state.
    pub fn run(&mut self) -> Result<EvolutionResult<P::Individual>> {
        self.run_observed(|_| {})
    }

    /// Runs to a terminal state, calling `on_generation` with each
    /// generation's record before the stopping rule is checked.
    ///
    /// The callback runs on the calling thread between generations; a
    /// host can use it to redraw live fitness charts.
    pub fn run_observed<F>(&mut self, mut on_generation: F) -> Result<EvolutionResult<P::Individual>>
    where
        F: FnMut(&FitnessRecord),
    {
        self.state = RunState::Initializing;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        log::info!(
            "starting evolution: population {}, survivors {}, max generations {}, seed {seed}",
            self.config.population_size,
            self.config.survival_count,
            self.config.max_generations
        );

        // 1. Initialize and evaluate
        let mut population = self.manager.initialize(self.problem, &mut rng)?;
        self.state = RunState::Evolving;

        let mut best = population[0].clone();
        let mut history = Vec::with_capacity(self.config.max_generations);
        let mut monitor =
            StagnationMonitor::new(self.config.stagnation_window, self.config.stagnation_threshold);

        // 2. Evolutionary loop
        let mut generation = 0usize;
        loop {
            let record = FitnessRecord {
                generation,
                best_fitness: population[0].fitness(),
                average_fitness: average_fitness(&population),
            };
            log::debug!(
                "generation {generation}: best {:.6}, average {:.6}",
                record.best_fitness,
                record.average_fitness
            );
            history.push(record);
            on_generation(&record);

            if population[0].fitness() > best.fitness() {
                best = population[0].clone();
            }

            if monitor.observe(best.fitness()) {
                self.state = RunState::Converged;
                break;
            }
            if history.len() >= self.config.max_generations {
                self.state = RunState::Exhausted;
                break;
            }
            if let Some(ref flag) = self.cancel {
                if flag.load(Ordering::Relaxed) {
                    self.state = RunState::Cancelled;
                    break;
                }
            }

            population = self
                .manager
                .next_generation(self.problem, &population, &mut rng)?;
            generation += 1;
        }

        log::info!(
            "evolution finished: {:?} after {} generations, best fitness {:.6}",
            self.state,
            history.len(),
            best.fitness()
        );

        Ok(EvolutionResult {
            best_fitness: best.fitness(),
            best,
            state: self.state,
            generations: history.len(),
            history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::ga::{resample_mutation, uniform_crossover};
    use rand::Rng;

    // ---- Climb: every generation's children beat their parents by 1 ----

    #[derive(Clone, Debug)]
    struct Counter {
        value: u32,
        fitness: f64,
    }

    impl Individual for Counter {
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct Climb;

    impl GaProblem for Climb {
        type Individual = Counter;

        fn create_individual<R: Rng>(&self, _rng: &mut R) -> Result<Counter> {
            Ok(Counter {
                value: 0,
                fitness: f64::NEG_INFINITY,
            })
        }

        fn evaluate(&self, ind: &Counter) -> Result<f64> {
            Ok(ind.value as f64)
        }

        fn crossover<R: Rng>(&self, p1: &Counter, p2: &Counter, _rng: &mut R) -> Counter {
            Counter {
                value: p1.value.max(p2.value) + 1,
                fitness: f64::NEG_INFINITY,
            }
        }

        fn mutate<R: Rng>(&self, _ind: &mut Counter, _rate: f64, _rng: &mut R) -> Result<()> {
            Ok(())
        }
    }

    // ---- Flat: every individual scores the same ----

    struct Flat;

    impl GaProblem for Flat {
        type Individual = Counter;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<Counter> {
            Ok(Counter {
                value: rng.random_range(0..100),
                fitness: f64::NEG_INFINITY,
            })
        }

        fn evaluate(&self, _ind: &Counter) -> Result<f64> {
            Ok(-1.0)
        }

        fn crossover<R: Rng>(&self, p1: &Counter, _p2: &Counter, _rng: &mut R) -> Counter {
            p1.clone()
        }

        fn mutate<R: Rng>(&self, _ind: &mut Counter, _rate: f64, _rng: &mut R) -> Result<()> {
            Ok(())
        }
    }

    // ---- OneMax: maximize the number of true bits ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
        fitness: f64,
    }

    impl Individual for BitString {
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct OneMax {
        n: usize,
        fail_above: Option<usize>,
    }

    impl GaProblem for OneMax {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<BitString> {
            Ok(BitString {
                bits: (0..self.n).map(|_| rng.random_bool(0.5)).collect(),
                fitness: f64::NEG_INFINITY,
            })
        }

        fn evaluate(&self, ind: &BitString) -> Result<f64> {
            let ones = ind.bits.iter().filter(|&&b| b).count();
            match self.fail_above {
                Some(limit) if ones > limit => {
                    Err(PlanError::InvalidIndividual(format!("{ones} bits set")))
                }
                _ => Ok(ones as f64),
            }
        }

        fn crossover<R: Rng>(&self, p1: &BitString, p2: &BitString, rng: &mut R) -> BitString {
            BitString {
                bits: uniform_crossover(&p1.bits, &p2.bits, rng),
                fitness: f64::NEG_INFINITY,
            }
        }

        fn mutate<R: Rng>(&self, ind: &mut BitString, rate: f64, rng: &mut R) -> Result<()> {
            resample_mutation(&mut ind.bits, rate, rng, |bit, rng| {
                *bit = rng.random_bool(0.5);
                Ok::<(), PlanError>(())
            })?;
            Ok(())
        }
    }

    fn config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(20)
            .with_survival_count(5)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_steady_improvement_exhausts_at_max_generations() {
        let config = config().with_stagnation(5, 0.01).with_max_generations(30);
        let mut controller = EvolutionController::new(&Climb, config).unwrap();
        assert_eq!(controller.state(), RunState::Initializing);

        let result = controller.run().unwrap();

        assert_eq!(result.state, RunState::Exhausted);
        assert_eq!(controller.state(), RunState::Exhausted);
        assert_eq!(result.generations, 30);
        assert_eq!(result.history.len(), 30);
        assert_eq!(result.history.last().unwrap().generation, 29);
        assert_eq!(result.best_fitness, 29.0);
        assert_eq!(result.best.value, 29);
    }

    #[test]
    fn test_flat_fitness_converges_at_window() {
        let config = config().with_stagnation(10, 0.01).with_max_generations(200);
        let result = EvolutionController::new(&Flat, config).unwrap().run().unwrap();

        assert_eq!(result.state, RunState::Converged);
        assert_eq!(result.history.last().unwrap().generation, 10);
        assert_eq!(result.generations, 11);
        assert_eq!(result.history.len(), result.generations);
    }

    #[test]
    fn test_convergence_ignores_max_generations() {
        for max in [50, 500, 5000] {
            let config = config().with_stagnation(7, 0.01).with_max_generations(max);
            let result = EvolutionController::new(&Flat, config).unwrap().run().unwrap();
            assert_eq!(result.state, RunState::Converged);
            assert_eq!(result.generations, 8);
        }
    }

    #[test]
    fn test_zero_window_runs_to_cap() {
        let config = config().with_stagnation(0, 0.01).with_max_generations(12);
        let result = EvolutionController::new(&Flat, config).unwrap().run().unwrap();
        assert_eq!(result.state, RunState::Exhausted);
        assert_eq!(result.generations, 12);
    }

    #[test]
    fn test_elitism_never_regresses() {
        let problem = OneMax { n: 40, fail_above: None };
        let config = config()
            .with_mutation_rate(0.1)
            .with_stagnation(0, 0.0)
            .with_max_generations(60);
        let result = EvolutionController::new(&problem, config).unwrap().run().unwrap();

        for pair in result.history.windows(2) {
            assert!(
                pair[1].best_fitness >= pair[0].best_fitness,
                "best fitness regressed: {} -> {}",
                pair[0].best_fitness,
                pair[1].best_fitness
            );
        }
        assert!(result.best_fitness > result.history[0].best_fitness);
    }

    #[test]
    fn test_history_statistics() {
        let problem = OneMax { n: 20, fail_above: None };
        let config = config().with_stagnation(0, 0.0).with_max_generations(15);
        let result = EvolutionController::new(&problem, config).unwrap().run().unwrap();

        for (i, record) in result.history.iter().enumerate() {
            assert_eq!(record.generation, i);
            assert!(record.average_fitness <= record.best_fitness);
        }
        let best_seen = result
            .history
            .iter()
            .map(|r| r.best_fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_fitness, best_seen);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let config = config().with_stagnation(0, 0.0).with_max_generations(9);
        let mut seen = Vec::new();
        let result = EvolutionController::new(&Climb, config)
            .unwrap()
            .run_observed(|record| seen.push(*record))
            .unwrap();
        assert_eq!(seen, result.history);
    }

    #[test]
    fn test_cancellation_stops_at_boundary() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = config().with_stagnation(0, 0.0).with_max_generations(1000);
        let result = EvolutionController::new(&Climb, config)
            .unwrap()
            .with_cancel(flag)
            .run()
            .unwrap();

        assert_eq!(result.state, RunState::Cancelled);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_cancellation_from_observer() {
        let flag = Arc::new(AtomicBool::new(false));
        let trigger = Arc::clone(&flag);
        let config = config().with_stagnation(0, 0.0).with_max_generations(1000);
        let result = EvolutionController::new(&Climb, config)
            .unwrap()
            .with_cancel(flag)
            .run_observed(|record| {
                if record.generation == 4 {
                    trigger.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();

        assert_eq!(result.state, RunState::Cancelled);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_config_errors_surface_in_new() {
        let err = EvolutionController::new(&Climb, config().with_survival_count(1))
            .err()
            .unwrap();
        assert!(matches!(err, PlanError::PopulationUnderflow { .. }));
    }

    #[test]
    fn test_evaluation_errors_propagate() {
        let problem = OneMax { n: 30, fail_above: Some(0) };
        let err = EvolutionController::new(&problem, config())
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidIndividual(_)));
    }

    #[test]
    fn test_seed_reproducibility() {
        let problem = OneMax { n: 30, fail_above: None };
        let config = config().with_mutation_rate(0.05).with_max_generations(25);
        let a = EvolutionController::new(&problem, config.clone()).unwrap().run().unwrap();
        let b = EvolutionController::new(&problem, config).unwrap().run().unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best.bits, b.best.bits);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RunState::Initializing.is_terminal());
        assert!(!RunState::Evolving.is_terminal());
        assert!(RunState::Converged.is_terminal());
        assert!(RunState::Exhausted.is_terminal());
        assert!(RunState::Cancelled.is_terminal());
    }
}
