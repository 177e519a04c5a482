//! Pod placement optimization for the U-Engine ecosystem.
//!
//! Assigns demand units ("pods") to capacity-bounded hosts ("nodes") by
//! minimizing a weighted cost of capacity overuse, load imbalance, and
//! node consolidation, searched with simulated annealing.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Resources`, `Pod`, `Node`, `Problem`, `Assignment`
//! - **`sa`**: Cost model, greedy start, neighborhood moves, annealing loop
//! - **`policy`**: Policy name registry (`fifo`, `fair`, `sa`, `binpacking`)
//! - **`report`**: Per-node utilization summary of a solution
//! - **`validation`**: Opt-in input integrity checks
//!
//! # Example
//!
//! ```
//! use u_placement::models::{Node, Pod, Problem, Resources};
//! use u_placement::sa::{SaParams, SaRunner};
//!
//! let res = |cpu: f64, mem: f64| Resources::new().with("cpu", cpu).with("memory", mem);
//! let problem = Problem::new(["cpu", "memory"])
//!     .with_pods([Pod::new(res(500.0, 1024.0)), Pod::new(res(800.0, 2048.0))])
//!     .with_nodes([Node::new(res(1000.0, 2048.0)), Node::new(res(1000.0, 2048.0))]);
//!
//! let params = SaParams::default().with_seed(42).with_weights(1000.0, 1.0, 0.05);
//! let result = SaRunner::new(&problem, params).run();
//! assert_eq!(result.assignment.len(), 2);
//! assert!(result.cost <= result.initial_cost);
//! ```
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

pub mod error;
pub mod models;
pub mod policy;
pub mod report;
pub mod sa;
pub mod validation;

pub use error::PolicyError;
