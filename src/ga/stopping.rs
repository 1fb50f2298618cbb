//! Early stopping on stagnation.

use std::collections::VecDeque;

/// Watches the best-so-far fitness and reports stagnation.
///
/// Keeps the last `window + 1` observations. Once the buffer is full and
/// the newest value exceeds the oldest by less than `threshold`, the run
/// has stagnated. A history that is flat from the start therefore
/// stagnates on the observation at generation index `window`.
///
/// A window of 0 disables the check.
///
/// # Examples
///
/// ```
/// use u_dietplan::ga::StagnationMonitor;
///
/// let mut monitor = StagnationMonitor::new(3, 0.01);
/// assert!(!monitor.observe(1.0)); // generation 0
/// assert!(!monitor.observe(1.0));
/// assert!(!monitor.observe(1.0));
/// assert!(monitor.observe(1.0)); // generation 3
/// ```
#[derive(Debug, Clone)]
pub struct StagnationMonitor {
    window: usize,
    threshold: f64,
    recent: VecDeque<f64>,
}

impl StagnationMonitor {
    pub fn new(window: usize, threshold: f64) -> Self {
        Self {
            window,
            threshold,
            recent: VecDeque::with_capacity(window + 1),
        }
    }

    /// Records the best-so-far fitness of one generation and returns
    /// `true` if the run has stagnated.
    pub fn observe(&mut self, best_so_far: f64) -> bool {
        if self.window == 0 {
            return false;
        }
        if self.recent.len() == self.window + 1 {
            self.recent.pop_front();
        }
        self.recent.push_back(best_so_far);
        if self.recent.len() <= self.window {
            return false;
        }
        match (self.recent.front(), self.recent.back()) {
            (Some(&oldest), Some(&newest)) => {
                let improvement = newest - oldest;
                log::trace!(
                    "improvement over last {} generations: {improvement}",
                    self.window
                );
                improvement < self.threshold
            }
            _ => false,
        }
    }

    /// Forgets all observations.
    pub fn reset(&mut self) {
        self.recent.clear();
    }
}
