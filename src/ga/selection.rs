//! Parent selection from the breeding pool.
//!
//! The pool is the top-K slice of a population ranked best-first, so an
//! index is also a rank: index 0 is the fittest survivor. Every strategy
//! returns two **distinct** indices.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use rand::Rng;

/// Strategy for drawing a pair of parents from the ranked breeding pool.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_dietplan::ga::ParentSelection;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let (a, b) = ParentSelection::Uniform.select_pair(5, &mut rng);
/// assert_ne!(a, b);
/// assert!(a < 5 && b < 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentSelection {
    /// Every survivor is equally likely.
    #[default]
    Uniform,

    /// Tournament selection: draw `k` survivors, keep the best-ranked.
    ///
    /// Higher `k` = stronger selection pressure.
    Tournament(usize),

    /// Linear ranking: the survivor at rank `r` (0 = best) of `n` has
    /// weight `n - r`.
    Rank,
}

impl ParentSelection {
    /// Draws two distinct indices from a pool of `pool_size` ranked survivors.
    ///
    /// # Panics
    /// Panics if `pool_size < 2`.
    pub fn select_pair<R: Rng>(&self, pool_size: usize, rng: &mut R) -> (usize, usize) {
        assert!(
            pool_size >= 2,
            "cannot select two distinct parents from a pool of {pool_size}"
        );
        let first = self.select(pool_size, None, rng);
        let second = self.select(pool_size, Some(first), rng);
        (first, second)
    }

    /// Draws one index in `0..pool_size`, never `exclude`.
    fn select<R: Rng>(&self, pool_size: usize, exclude: Option<usize>, rng: &mut R) -> usize {
        let n = pool_size - usize::from(exclude.is_some());
        // Draw a rank among the `n` eligible survivors, then map it back
        // over the excluded slot. Rank order is preserved by the mapping.
        let rank = match *self {
            ParentSelection::Uniform => rng.random_range(0..n),
            ParentSelection::Tournament(k) => tournament(n, k, rng),
            ParentSelection::Rank => linear_rank(n, rng),
        };
        match exclude {
            Some(skip) if rank >= skip => rank + 1,
            _ => rank,
        }
    }
}

/// Tournament over ranks: the smallest of `k` uniform draws wins.
fn tournament<R: Rng>(n: usize, k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    (0..k)
        .map(|_| rng.random_range(0..n))
        .min()
        .unwrap_or(0)
}

/// Linear ranking: rank r gets weight `n - r`.
fn linear_rank<R: Rng>(n: usize, rng: &mut R) -> usize {
    let total = (n * (n + 1) / 2) as f64;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for rank in 0..n {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return rank;
        }
    }
    n - 1 // floating-point fallback
}
