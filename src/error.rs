//! Error type shared by the catalog, the fitness evaluator and the engine.
//!
//! Every failure is a configuration or consistency problem: the engine
//! does no I/O, so there are no transient errors to retry.

use crate::catalog::Category;
use thiserror::Error;

/// Errors raised while building a catalog, validating configuration, or
/// running the evolutionary loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A category needed by the slot schema has no items.
    #[error("food category `{0}` has no items")]
    EmptyCategory(Category),

    /// The breeding pool cannot supply two distinct parents.
    #[error(
        "survival count {survival_count} leaves fewer than 2 parents \
         (population size {population_size})"
    )]
    PopulationUnderflow {
        survival_count: usize,
        population_size: usize,
    },

    /// A plan broke its slot invariants. Indicates a bug in an operator.
    #[error("invalid individual: {0}")]
    InvalidIndividual(String),

    /// A food item failed validation at catalog load time.
    #[error("invalid food item `{name}`: {reason}")]
    InvalidFood { name: String, reason: String },

    /// A category name did not parse.
    #[error("unknown food category `{0}`")]
    UnknownCategory(String),

    /// Any other invalid parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T, E = PlanError> = std::result::Result<T, E>;
