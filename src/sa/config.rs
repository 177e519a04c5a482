//! Annealing parameters.
//!
//! [`SaParams`] is deliberately forgiving: out-of-range values are not
//! rejected but replaced by defaults in [`SaParams::normalized`].
//!
//! | Field | Out of range | Default |
//! |-------|--------------|---------|
//! | `iterations` | `0` | 2000 |
//! | `initial_temp` | `<= 0` or non-finite | 1.0 |
//! | `cooling_rate` | outside `(0, 1)` | 0.995 |
//! | `seed` | `0` | time-derived |

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Default iteration budget.
pub const DEFAULT_ITERATIONS: usize = 2000;
/// Default starting temperature.
pub const DEFAULT_INITIAL_TEMP: f64 = 1.0;
/// Default geometric cooling factor.
pub const DEFAULT_COOLING_RATE: f64 = 0.995;
/// Temperature below which the search stops.
pub const MIN_TEMPERATURE: f64 = 1e-6;

/// How the starting assignment is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialStrategy {
    /// Re-evaluates the full cost of the partial assignment for every
    /// candidate node. O(pods² · nodes).
    #[default]
    FullReevaluation,
    /// Maintains node usage while committing pods and scores candidates
    /// from it. Produces the same assignment as `FullReevaluation`.
    Incremental,
}

/// Simulated annealing configuration and cost weights.
///
/// # Example
/// ```
/// use u_placement::sa::SaParams;
///
/// let params = SaParams::default()
///     .with_iterations(4000)
///     .with_initial_temp(1.2)
///     .with_cooling_rate(0.996)
///     .with_seed(42)
///     .with_weights(1000.0, 1.0, 0.05);
/// assert_eq!(params.normalized().seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaParams {
    /// Iteration budget (0 = default).
    pub iterations: usize,
    /// Starting temperature (<= 0 = default).
    pub initial_temp: f64,
    /// Geometric cooling factor, applied every iteration.
    pub cooling_rate: f64,
    /// Random seed. `0` draws a time-derived seed, so runs are only
    /// reproducible with an explicit nonzero seed.
    pub seed: u64,
    /// Weight of the capacity overuse term.
    pub w_overuse: f64,
    /// Weight of the utilization variance term.
    pub w_variance: f64,
    /// Weight of the active node count. Positive consolidates work onto
    /// fewer nodes, negative spreads it.
    pub w_active_nodes: f64,
    /// Wall-clock bound on the annealing loop.
    pub time_limit: Option<Duration>,
    /// Starting assignment construction.
    pub initial_strategy: InitialStrategy,
}

impl Default for SaParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            initial_temp: DEFAULT_INITIAL_TEMP,
            cooling_rate: DEFAULT_COOLING_RATE,
            seed: 0,
            w_overuse: 1.0,
            w_variance: 1.0,
            w_active_nodes: 0.0,
            time_limit: None,
            initial_strategy: InitialStrategy::FullReevaluation,
        }
    }
}

impl SaParams {
    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the starting temperature.
    pub fn with_initial_temp(mut self, temp: f64) -> Self {
        self.initial_temp = temp;
        self
    }

    /// Sets the cooling factor.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the overuse, variance, and active-node weights.
    pub fn with_weights(mut self, overuse: f64, variance: f64, active_nodes: f64) -> Self {
        self.w_overuse = overuse;
        self.w_variance = variance;
        self.w_active_nodes = active_nodes;
        self
    }

    /// Sets a wall-clock bound on the search.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Selects the starting assignment construction.
    pub fn with_initial_strategy(mut self, strategy: InitialStrategy) -> Self {
        self.initial_strategy = strategy;
        self
    }

    /// Returns a copy with out-of-range values replaced by defaults and
    /// a zero seed replaced by a time-derived one.
    pub fn normalized(&self) -> Self {
        let mut p = self.clone();
        if p.iterations == 0 {
            p.iterations = DEFAULT_ITERATIONS;
        }
        if !(p.initial_temp > 0.0 && p.initial_temp.is_finite()) {
            p.initial_temp = DEFAULT_INITIAL_TEMP;
        }
        if !(p.cooling_rate > 0.0 && p.cooling_rate < 1.0) {
            p.cooling_rate = DEFAULT_COOLING_RATE;
        }
        if p.seed == 0 {
            p.seed = time_seed();
        }
        p
    }
}

/// Nonzero seed derived from the wall clock.
pub(crate) fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos.max(1)
}
