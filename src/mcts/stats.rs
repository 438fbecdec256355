//! Search statistics collection.

use serde::{Deserialize, Serialize};

/// Counters for a single search run.
///
/// Reset at the start of every [`search`](super::MCTSSearch::search)
/// call, so the values always describe the most recent search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations completed.
    pub iterations: u32,

    /// Nodes expanded with edges (terminal nodes excluded).
    pub nodes_expanded: u32,

    /// Rollouts performed.
    pub simulations: u32,

    /// Deepest node created in the tree.
    pub max_depth: u16,

    /// Wall-clock search time in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    /// Create fresh statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iterations per second, or 0.0 when no time was recorded.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
    }

    /// Simulations per second, or 0.0 when no time was recorded.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
    }

    /// Average node expansions per iteration.
    #[must_use]
    pub fn expansions_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.nodes_expanded as f64 / self.iterations as f64
    }
}
