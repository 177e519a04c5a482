//! Placement quality report.
//!
//! Summarizes an evaluated assignment per node and per resource key.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Utilization | usage / capacity per (node, key); `None` when capacity ≤ 0 |
//! | Active | Node has positive total usage |
//! | Overcommitted | (node, key) pairs with utilization > 1, or usage on zero capacity |
//! | Mean utilization | Mean over nodes with positive capacity, per key |

use serde::{Deserialize, Serialize};

use crate::models::Problem;
use crate::sa::Evaluation;

/// Utilization of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReport {
    /// Node index.
    pub node: usize,
    /// Utilization per considered key, aligned with `resource_keys`.
    pub utilization: Vec<Option<f64>>,
    /// Whether the node carries any usage.
    pub active: bool,
}

/// A (node, key) pair beyond capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overcommit {
    /// Node index.
    pub node: usize,
    /// Resource key.
    pub key: String,
    /// Aggregated usage.
    pub usage: f64,
    /// Node capacity for the key.
    pub capacity: f64,
}

/// Per-node utilization summary of an evaluated assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    /// Considered keys, in column order.
    pub resource_keys: Vec<String>,
    /// One entry per node.
    pub nodes: Vec<NodeReport>,
    /// Mean utilization per key over nodes with positive capacity.
    pub mean_utilization: Vec<Option<f64>>,
    /// Capacity violations.
    pub overcommitted: Vec<Overcommit>,
    /// Cost the report was built from.
    pub cost: f64,
}

impl UtilizationReport {
    /// Builds the report from an evaluation of `problem`.
    ///
    /// ```
    /// use u_placement::models::{Assignment, Node, Pod, Problem, Resources};
    /// use u_placement::report::UtilizationReport;
    /// use u_placement::sa::{evaluate, SaParams};
    ///
    /// let problem = Problem::new(["cpu"])
    ///     .with_pod(Pod::new(Resources::new().with("cpu", 50.0)))
    ///     .with_node(Node::new(Resources::new().with("cpu", 100.0)));
    /// let eval = evaluate(&problem, &Assignment::from_nodes([0]), &SaParams::default());
    /// let report = UtilizationReport::from_evaluation(&problem, &eval);
    /// assert_eq!(report.nodes[0].utilization[0], Some(0.5));
    /// ```
    pub fn from_evaluation(problem: &Problem, evaluation: &Evaluation) -> Self {
        let usage = &evaluation.usage;
        let mut nodes = Vec::with_capacity(problem.node_count());
        let mut overcommitted = Vec::new();

        for (n, node) in problem.nodes.iter().enumerate() {
            let mut utilization = Vec::with_capacity(problem.key_count());
            for (k, key) in problem.resource_keys.iter().enumerate() {
                let cap = node.capacity.get(key);
                let used = usage.at(n, k);
                if cap <= 0.0 {
                    utilization.push(None);
                    if used > 0.0 {
                        overcommitted.push(Overcommit {
                            node: n,
                            key: key.clone(),
                            usage: used,
                            capacity: cap,
                        });
                    }
                    continue;
                }
                let u = used / cap;
                if u > 1.0 {
                    overcommitted.push(Overcommit {
                        node: n,
                        key: key.clone(),
                        usage: used,
                        capacity: cap,
                    });
                }
                utilization.push(Some(u));
            }
            nodes.push(NodeReport {
                node: n,
                utilization,
                active: usage.node_total(n) > 0.0,
            });
        }

        let mean_utilization = (0..problem.key_count())
            .map(|k| {
                let sample: Vec<f64> = nodes.iter().filter_map(|r| r.utilization[k]).collect();
                if sample.is_empty() {
                    None
                } else {
                    Some(sample.iter().sum::<f64>() / sample.len() as f64)
                }
            })
            .collect();

        Self {
            resource_keys: problem.resource_keys.clone(),
            nodes,
            mean_utilization,
            overcommitted,
            cost: evaluation.cost,
        }
    }

    /// Number of nodes carrying usage.
    pub fn active_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.active).count()
    }

    /// Whether every (node, key) stays within capacity.
    pub fn is_feasible(&self) -> bool {
        self.overcommitted.is_empty()
    }

    /// Utilization of a named key on a node.
    pub fn utilization(&self, node: usize, key: &str) -> Option<f64> {
        let k = self.resource_keys.iter().position(|rk| rk == key)?;
        self.nodes.get(node)?.utilization[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Node, Pod, Resources};
    use crate::sa::{evaluate, SaParams};

    fn res(cpu: f64, mem: f64) -> Resources {
        Resources::new().with("cpu", cpu).with("memory", mem)
    }

    fn report_for(problem: &Problem, nodes: &[usize]) -> UtilizationReport {
        let eval = evaluate(
            problem,
            &Assignment::from_nodes(nodes.iter().copied()),
            &SaParams::default(),
        );
        UtilizationReport::from_evaluation(problem, &eval)
    }

    #[test]
    fn test_report_basic() {
        let problem = Problem::new(["cpu", "memory"])
            .with_pods([Pod::new(res(500.0, 1024.0)), Pod::new(res(250.0, 512.0))])
            .with_nodes([Node::new(res(1000.0, 2048.0)), Node::new(res(1000.0, 2048.0))]);
        let report = report_for(&problem, &[0, 0]);

        assert!((report.utilization(0, "cpu").unwrap() - 0.75).abs() < 1e-10);
        assert!((report.utilization(0, "memory").unwrap() - 0.75).abs() < 1e-10);
        assert_eq!(report.utilization(1, "cpu"), Some(0.0));
        assert_eq!(report.active_nodes(), 1);
        assert!(report.is_feasible());
        // (0.75 + 0.0) / 2
        assert!((report.mean_utilization[0].unwrap() - 0.375).abs() < 1e-10);
    }

    #[test]
    fn test_report_overcommit() {
        let problem = Problem::new(["cpu"])
            .with_pods([Pod::new(res(60.0, 0.0)), Pod::new(res(60.0, 0.0))])
            .with_node(Node::new(res(100.0, 0.0)));
        let report = report_for(&problem, &[0, 0]);
        assert!(!report.is_feasible());
        assert_eq!(report.overcommitted.len(), 1);
        assert_eq!(report.overcommitted[0].key, "cpu");
        assert!((report.overcommitted[0].usage - 120.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_zero_capacity() {
        let problem = Problem::new(["cpu", "memory"])
            .with_pod(Pod::new(res(1.0, 1.0)))
            .with_node(Node::new(Resources::new().with("cpu", 10.0)));
        let report = report_for(&problem, &[0]);
        assert_eq!(report.utilization(0, "memory"), None);
        assert_eq!(report.mean_utilization[1], None);
        assert_eq!(report.overcommitted.len(), 1);
        assert_eq!(report.overcommitted[0].key, "memory");
    }

    #[test]
    fn test_unknown_key_or_node() {
        let problem = Problem::new(["cpu"]).with_node(Node::new(res(1.0, 0.0)));
        let report = report_for(&problem, &[]);
        assert_eq!(report.utilization(0, "gpu"), None);
        assert_eq!(report.utilization(3, "cpu"), None);
    }
}
