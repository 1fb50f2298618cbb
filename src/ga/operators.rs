//! Positional crossover and mutation operators.
//!
//! These work on any fixed-length chromosome where gene `i` of a child
//! must come from gene `i` of a parent, so positional constraints that
//! hold for both parents also hold for the child.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use rand::Rng;

/// How a child's genes are split between its two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverScheme {
    /// Independent fair coin per gene.
    #[default]
    Uniform,
    /// Genes before a random cut come from parent 1, the rest from parent 2.
    SinglePoint,
}

impl CrossoverScheme {
    /// Builds one child from two equal-length parents.
    pub fn apply<T: Clone, R: Rng>(self, parent1: &[T], parent2: &[T], rng: &mut R) -> Vec<T> {
        match self {
            CrossoverScheme::Uniform => uniform_crossover(parent1, parent2, rng),
            CrossoverScheme::SinglePoint => single_point_crossover(parent1, parent2, rng),
        }
    }
}

/// Uniform crossover: each gene is copied from either parent with
/// probability 1/2.
///
/// # Complexity
/// O(n)
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform_crossover<T: Clone, R: Rng>(parent1: &[T], parent2: &[T], rng: &mut R) -> Vec<T> {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    parent1
        .iter()
        .zip(parent2)
        .map(|(a, b)| if rng.random_bool(0.5) { a.clone() } else { b.clone() })
        .collect()
}

/// Single-point crossover: genes `[0, cut)` from parent 1, `[cut, n)` from
/// parent 2, with `cut` uniform in `0..=n`.
///
/// # Complexity
/// O(n)
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn single_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> Vec<T> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    let cut = rng.random_range(0..=n);
    parent1[..cut]
        .iter()
        .chain(&parent2[cut..])
        .cloned()
        .collect()
}

/// Resampling mutation: each gene is passed to `resample` with
/// probability `rate`.
///
/// Returns the number of genes resampled.
///
/// # Panics
/// Panics if `rate` is outside `[0, 1]`.
pub fn resample_mutation<T, R, F, E>(
    genes: &mut [T],
    rate: f64,
    rng: &mut R,
    mut resample: F,
) -> Result<usize, E>
where
    R: Rng,
    F: FnMut(&mut T, &mut R) -> Result<(), E>,
{
    let mut changed = 0;
    for gene in genes.iter_mut() {
        if rng.random_bool(rate) {
            resample(gene, rng)?;
            changed += 1;
        }
    }
    Ok(changed)
}
