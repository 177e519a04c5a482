//! Simulated annealing for pod placement.
//!
//! # Submodules
//!
//! - [`cost`]: weighted cost model (overuse, variance, active nodes)
//! - `initial`: greedy starting assignment
//! - `neighbor`: move / swap perturbations
//! - `runner`: the annealing loop
//! - `config`: parameters and their defaults
//!
//! # Usage
//!
//! ```
//! use u_placement::models::{Node, Pod, Problem, Resources};
//! use u_placement::sa::{solve, SaParams};
//!
//! let problem = Problem::new(["cpu", "memory"])
//!     .with_pod(Pod::new(Resources::new().with("cpu", 500.0).with("memory", 1024.0)))
//!     .with_node(Node::new(Resources::new().with("cpu", 2000.0).with("memory", 4096.0)));
//!
//! let (assignment, cost) = solve(&problem, &SaParams::default().with_seed(42));
//! assert_eq!(assignment.node_of(0), Some(0));
//! assert!(cost.is_finite());
//! ```

mod config;
pub mod cost;
mod initial;
mod neighbor;
mod runner;

pub use config::{
    InitialStrategy, SaParams, DEFAULT_COOLING_RATE, DEFAULT_INITIAL_TEMP, DEFAULT_ITERATIONS,
    MIN_TEMPERATURE,
};
pub use cost::{cost_of, evaluate, Evaluation, Usage, ZERO_CAPACITY_PENALTY};
pub use initial::{greedy_full, greedy_incremental, greedy_initial};
pub use neighbor::{neighbor, neighbor_with_kind, MoveKind};
pub use runner::{solve, SaResult, SaRunner, StopReason};

pub(crate) use config::time_seed;
