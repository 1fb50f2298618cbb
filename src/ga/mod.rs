//! Genetic Algorithm engine.
//!
//! A generic engine built on trait-based abstractions. A problem plugs in
//! by implementing [`GaProblem`], which specifies how to create, evaluate,
//! cross over and mutate individuals. Fitness is maximized.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its fitness
//! - [`GaProblem`]: Problem definition: validation, initialization,
//!   evaluation, operators
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: Algorithm parameters (population, survivors, presets)
//! - [`PopulationManager`]: Ranking, survival, elitism, breeding
//! - [`StagnationMonitor`]: Early stopping on a flat best-fitness window
//! - [`EvolutionController`]: Runs the loop and returns an [`EvolutionResult`]
//!
//! # Submodules
//!
//! - [`operators`]: Positional crossover (uniform, single-point) and
//!   resampling mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod population;
mod runner;
mod selection;
mod stopping;
mod types;

pub use config::EvolutionConfig;
pub use operators::{
    resample_mutation, single_point_crossover, uniform_crossover, CrossoverScheme,
};
pub use population::{average_fitness, rank, PopulationManager};
pub use runner::{EvolutionController, EvolutionResult, FitnessRecord, RunState};
pub use selection::ParentSelection;
pub use stopping::StagnationMonitor;
pub use types::{GaProblem, Individual};
