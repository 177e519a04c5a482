//! Simulated annealing loop.
//!
//! # Algorithm
//!
//! 1. Build the starting assignment greedily and score it.
//! 2. Repeat up to the iteration budget:
//!    - draw a neighbor and score it,
//!    - accept if it is better, or with probability `exp(−Δ/T)` otherwise
//!      (Metropolis criterion),
//!    - remember the best assignment seen,
//!    - cool geometrically: `T ← T · rate`, stopping once `T < 1e-6`.
//! 3. Return the best assignment.
//!
//! The greedy builder and the loop each own a random stream derived from
//! the single seed, so a nonzero seed reproduces the same result and
//! concurrent calls share no generator.
//!
//! # Reference
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::models::{Assignment, Problem};

use super::config::{SaParams, MIN_TEMPERATURE};
use super::cost::cost_of;
use super::initial::greedy_initial;
use super::neighbor::neighbor;

/// Mixed into the seed for the main-loop stream so it differs from the
/// builder stream.
const LOOP_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Why the annealing loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// All iterations were used.
    IterationBudget,
    /// Temperature fell below the floor.
    TemperatureFloor,
    /// `time_limit` elapsed.
    TimeLimit,
    /// The cancel flag was raised.
    Cancelled,
}

/// Outcome of an annealing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaResult {
    /// Best assignment found.
    pub assignment: Assignment,
    /// Cost of `assignment`.
    pub cost: f64,
    /// Cost of the greedy starting assignment.
    pub initial_cost: f64,
    /// Loop iterations executed.
    pub iterations: usize,
    /// Candidates accepted.
    pub accepted: usize,
    /// Times a new best was recorded.
    pub improvements: usize,
    /// Temperature when the loop ended.
    pub final_temperature: f64,
    /// Seed actually used (time-derived when the caller passed 0).
    pub seed: u64,
    /// Why the loop ended.
    pub stop_reason: StopReason,
    /// Wall time of the whole run, including the greedy start.
    pub elapsed: Duration,
}

/// Annealing driver with optional cooperative cancellation.
///
/// # Example
/// ```
/// use u_placement::models::{Node, Pod, Problem, Resources};
/// use u_placement::sa::{SaParams, SaRunner};
///
/// let problem = Problem::new(["cpu"])
///     .with_pods([
///         Pod::new(Resources::new().with("cpu", 60.0)),
///         Pod::new(Resources::new().with("cpu", 60.0)),
///     ])
///     .with_nodes([
///         Node::new(Resources::new().with("cpu", 100.0)),
///         Node::new(Resources::new().with("cpu", 100.0)),
///     ]);
/// let params = SaParams::default().with_seed(42).with_weights(1000.0, 1.0, 0.0);
///
/// let result = SaRunner::new(&problem, params).run();
/// assert_eq!(result.assignment.len(), 2);
/// assert_ne!(result.assignment.node_of(0), result.assignment.node_of(1));
/// ```
pub struct SaRunner<'a> {
    problem: &'a Problem,
    params: SaParams,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> SaRunner<'a> {
    /// Creates a runner. Parameters are normalized when the run starts.
    pub fn new(problem: &'a Problem, params: SaParams) -> Self {
        Self {
            problem,
            params,
            cancel: None,
        }
    }

    /// Stops the loop at the next iteration once `flag` is `true`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Runs the search and returns the best assignment found.
    pub fn run(&self) -> SaResult {
        let started = Instant::now();
        let problem = self.problem;
        let params = self.params.normalized();

        debug!(
            pods = problem.pod_count(),
            nodes = problem.node_count(),
            keys = problem.key_count(),
            iterations = params.iterations,
            initial_temp = params.initial_temp,
            cooling_rate = params.cooling_rate,
            seed = params.seed,
            "starting simulated annealing"
        );

        let mut build_rng = SmallRng::seed_from_u64(params.seed);
        let mut rng = SmallRng::seed_from_u64(params.seed ^ LOOP_STREAM_SALT);

        let mut current = greedy_initial(problem, &params, &mut build_rng);
        let mut current_cost = cost_of(problem, &current, &params);
        let initial_cost = current_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let deadline = params.time_limit.and_then(|limit| started.checked_add(limit));
        let mut temperature = params.initial_temp;
        let mut iterations = 0;
        let mut accepted = 0;
        let mut improvements = 0;
        let mut stop_reason = StopReason::IterationBudget;

        while iterations < params.iterations {
            if let Some(reason) = self.interrupted(deadline) {
                warn!(iterations, best_cost, ?reason, "annealing stopped early");
                stop_reason = reason;
                break;
            }

            let candidate = neighbor(&mut rng, &current, problem.node_count());
            let candidate_cost = cost_of(problem, &candidate, &params);
            let delta = candidate_cost - current_cost;
            iterations += 1;

            if delta < 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
                current = candidate;
                current_cost = candidate_cost;
                accepted += 1;
                if current_cost < best_cost {
                    best.clone_from(&current);
                    best_cost = current_cost;
                    improvements += 1;
                    trace!(iteration = iterations, best_cost, temperature, "new best");
                }
            }

            temperature *= params.cooling_rate;
            if temperature < MIN_TEMPERATURE {
                stop_reason = StopReason::TemperatureFloor;
                break;
            }
        }

        let elapsed = started.elapsed();
        debug!(
            initial_cost,
            best_cost,
            iterations,
            accepted,
            improvements,
            ?stop_reason,
            elapsed_ms = elapsed.as_millis() as u64,
            "simulated annealing finished"
        );

        SaResult {
            assignment: best,
            cost: best_cost,
            initial_cost,
            iterations,
            accepted,
            improvements,
            final_temperature: temperature,
            seed: params.seed,
            stop_reason,
            elapsed,
        }
    }

    fn interrupted(&self, deadline: Option<Instant>) -> Option<StopReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        match deadline {
            Some(d) if Instant::now() >= d => Some(StopReason::TimeLimit),
            _ => None,
        }
    }
}

/// Runs simulated annealing and returns the best assignment and its cost.
///
/// Stateless: nothing is retained between calls.
pub fn solve(problem: &Problem, params: &SaParams) -> (Assignment, f64) {
    let result = SaRunner::new(problem, params.clone()).run();
    (result.assignment, result.cost)
}
