//! Placement cost model.
//!
//! Scores an assignment as a weighted sum of three terms:
//!
//! | Term | Definition |
//! |------|-----------|
//! | Overuse | Σ over (node, key) of `(u − 1)²` when `u = usage/capacity > 1`, plus [`ZERO_CAPACITY_PENALTY`] when a node without capacity for a key receives usage |
//! | Variance | Population variance of per-node utilization for each key (nodes with positive capacity only), averaged over keys |
//! | Active nodes | Number of nodes with positive total usage |
//!
//! `cost = w_overuse · overuse + w_variance · variance + w_active_nodes · active`
//!
//! Usage is recomputed from scratch on every call. Lower cost is better.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Problem, Resources};

use super::SaParams;

/// Penalty added once per (node, key) whose capacity is ≤ 0 but whose
/// usage is positive.
pub const ZERO_CAPACITY_PENALTY: f64 = 1e6;

/// Aggregated usage per node over the considered resource keys.
///
/// Stored densely: one row per node, one column per entry of
/// [`Problem::resource_keys`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    keys: Vec<String>,
    nodes: usize,
    values: Vec<f64>,
}

/// Result of scoring an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Weighted total.
    pub cost: f64,
    /// Unweighted overuse term.
    pub overuse: f64,
    /// Unweighted, key-averaged variance term.
    pub variance: f64,
    /// Number of nodes with positive total usage.
    pub active_nodes: usize,
    /// Per-node usage the terms were computed from.
    pub usage: Usage,
}

impl Usage {
    /// All-zero usage for the problem's nodes and keys.
    pub fn zero(problem: &Problem) -> Self {
        Self {
            keys: problem.resource_keys.clone(),
            nodes: problem.node_count(),
            values: vec![0.0; problem.node_count() * problem.key_count()],
        }
    }

    /// Sums the demand of every placed pod into its node.
    ///
    /// Unplaced pods and out-of-range node indices are skipped.
    pub fn aggregate(problem: &Problem, assignment: &Assignment) -> Self {
        let mut usage = Self::zero(problem);
        let nodes = problem.node_count();
        for (pod_idx, pod) in problem.pods.iter().enumerate() {
            match assignment.node_of(pod_idx) {
                Some(node) if node < nodes => usage.add_demand(node, &pod.demand),
                _ => continue,
            }
        }
        usage
    }

    /// Adds a demand to one node's row.
    pub(crate) fn add_demand(&mut self, node: usize, demand: &Resources) {
        let width = self.keys.len();
        let row = &mut self.values[node * width..(node + 1) * width];
        for (slot, key) in row.iter_mut().zip(&self.keys) {
            *slot += demand.get(key);
        }
    }

    /// Copy of one node's row.
    pub(crate) fn row(&self, node: usize) -> Vec<f64> {
        let width = self.keys.len();
        self.values[node * width..(node + 1) * width].to_vec()
    }

    /// Overwrites one node's row.
    pub(crate) fn restore_row(&mut self, node: usize, row: &[f64]) {
        let width = self.keys.len();
        self.values[node * width..(node + 1) * width].copy_from_slice(row);
    }

    /// Usage of `key` (by position) on `node`.
    #[inline]
    pub fn at(&self, node: usize, key_idx: usize) -> f64 {
        self.values[node * self.keys.len() + key_idx]
    }

    /// Usage of a named key on `node` (0.0 for keys not considered).
    pub fn get(&self, node: usize, key: &str) -> f64 {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|idx| self.at(node, idx))
            .unwrap_or(0.0)
    }

    /// Sum of usage across all considered keys on `node`.
    pub fn node_total(&self, node: usize) -> f64 {
        (0..self.keys.len()).map(|k| self.at(node, k)).sum()
    }

    /// Number of nodes covered.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Considered keys, in column order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// One node's usage as a named map.
    pub fn to_resources(&self, node: usize) -> Resources {
        self.keys
            .iter()
            .enumerate()
            .map(|(k, key)| (key.clone(), self.at(node, k)))
            .collect()
    }
}

/// Scores an assignment.
///
/// Pure: repeated calls with the same inputs return bit-identical results.
///
/// # Example
/// ```
/// use u_placement::models::{Assignment, Node, Pod, Problem, Resources};
/// use u_placement::sa::{evaluate, SaParams};
///
/// let pod = Pod::new(Resources::new().with("cpu", 60.0));
/// let problem = Problem::new(["cpu"])
///     .with_pods([pod.clone(), pod])
///     .with_node(Node::new(Resources::new().with("cpu", 100.0)));
/// let params = SaParams::default().with_weights(1.0, 0.0, 0.0);
///
/// let eval = evaluate(&problem, &Assignment::from_nodes([0, 0]), &params);
/// assert!((eval.overuse - 0.04).abs() < 1e-9);
/// ```
pub fn evaluate(problem: &Problem, assignment: &Assignment, params: &SaParams) -> Evaluation {
    let usage = Usage::aggregate(problem, assignment);
    let terms = score_usage(problem, &usage, params);
    Evaluation {
        cost: terms.cost,
        overuse: terms.overuse,
        variance: terms.variance,
        active_nodes: terms.active_nodes,
        usage,
    }
}

/// Total cost only.
#[inline]
pub fn cost_of(problem: &Problem, assignment: &Assignment, params: &SaParams) -> f64 {
    evaluate(problem, assignment, params).cost
}

pub(crate) struct Terms {
    pub cost: f64,
    pub overuse: f64,
    pub variance: f64,
    pub active_nodes: usize,
}

/// Computes the cost terms from an already aggregated usage.
pub(crate) fn score_usage(problem: &Problem, usage: &Usage, params: &SaParams) -> Terms {
    let overuse = overuse_term(problem, usage);
    let variance = variance_term(problem, usage);
    let active_nodes = (0..problem.node_count())
        .filter(|&n| usage.node_total(n) > 0.0)
        .count();

    let cost = params.w_overuse * overuse
        + params.w_variance * variance
        + params.w_active_nodes * active_nodes as f64;

    Terms {
        cost,
        overuse,
        variance,
        active_nodes,
    }
}

fn overuse_term(problem: &Problem, usage: &Usage) -> f64 {
    let mut over = 0.0;
    for (n, node) in problem.nodes.iter().enumerate() {
        for (k, key) in problem.resource_keys.iter().enumerate() {
            let cap = node.capacity.get(key);
            let used = usage.at(n, k);
            if cap <= 0.0 {
                if used > 0.0 {
                    over += ZERO_CAPACITY_PENALTY;
                }
                continue;
            }
            let util = used / cap;
            if util > 1.0 {
                over += (util - 1.0) * (util - 1.0);
            }
        }
    }
    over
}

fn variance_term(problem: &Problem, usage: &Usage) -> f64 {
    let key_count = problem.key_count();
    if key_count == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut utils = Vec::with_capacity(problem.node_count());
    for (k, key) in problem.resource_keys.iter().enumerate() {
        utils.clear();
        for (n, node) in problem.nodes.iter().enumerate() {
            let cap = node.capacity.get(key);
            if cap <= 0.0 {
                continue;
            }
            utils.push((usage.at(n, k) / cap).max(0.0));
        }
        if utils.is_empty() {
            continue;
        }
        let len = utils.len() as f64;
        let mean = utils.iter().sum::<f64>() / len;
        let var = utils.iter().map(|u| (u - mean) * (u - mean)).sum::<f64>() / len;
        total += var;
    }
    total / key_count as f64
}
