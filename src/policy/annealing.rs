//! Policy-side annealing settings.
//!
//! When the `sa` sort policy is selected, the scheduler starts from a
//! hotter, faster-cooling schedule than the optimizer's own defaults.

use serde::{Deserialize, Serialize};

use crate::sa::{time_seed, SaParams};

/// Annealing schedule attached to the `sa` policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaPolicy {
    /// Starting temperature.
    pub initial_temp: f64,
    /// Geometric cooling factor.
    pub cooling_rate: f64,
    /// Seed for the optimizer. Time-derived unless configured.
    pub seed: u64,
}

impl Default for SaPolicy {
    fn default() -> Self {
        Self {
            initial_temp: 100.0,
            cooling_rate: 0.95,
            seed: time_seed(),
        }
    }
}

impl SaPolicy {
    /// Fixes the seed, making every solve under this policy reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Applies this schedule on top of `base`, keeping its iteration
    /// budget and cost weights.
    ///
    /// ```
    /// use u_placement::policy::SaPolicy;
    /// use u_placement::sa::SaParams;
    ///
    /// let params = SaPolicy::default().with_seed(7).apply(SaParams::default());
    /// assert_eq!(params.seed, 7);
    /// assert!((params.initial_temp - 100.0).abs() < 1e-12);
    /// ```
    pub fn apply(&self, base: SaParams) -> SaParams {
        base.with_initial_temp(self.initial_temp)
            .with_cooling_rate(self.cooling_rate)
            .with_seed(self.seed)
    }
}
