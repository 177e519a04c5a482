//! Placement problem model.
//!
//! A problem is an ordered list of pods (demand units), an ordered list
//! of nodes (capacity-bounded hosts), and the resource names to evaluate.
//! Positions in these lists are the identifiers used by [`Assignment`].
//!
//! [`Assignment`]: super::Assignment

use serde::{Deserialize, Serialize};

use super::Resources;

/// A unit of work requiring capacity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    /// Requested quantities.
    pub demand: Resources,
}

/// A placement target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Provided quantities. A quantity ≤ 0 means the node cannot
    /// provide that resource at all.
    pub capacity: Resources,
}

/// A placement problem instance.
///
/// Constructed fresh by the caller for each placement decision.
///
/// # Example
/// ```
/// use u_placement::models::{Node, Pod, Problem, Resources};
///
/// let problem = Problem::new(["cpu", "memory"])
///     .with_pod(Pod::new(Resources::new().with("cpu", 500.0).with("memory", 1024.0)))
///     .with_node(Node::new(Resources::new().with("cpu", 2000.0).with("memory", 4096.0)));
/// assert_eq!(problem.pod_count(), 1);
/// assert_eq!(problem.node_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Pods to place, in decision order.
    pub pods: Vec<Pod>,
    /// Candidate nodes.
    pub nodes: Vec<Node>,
    /// Resource names considered by the cost model. Names outside this
    /// list are ignored even when present in demand or capacity maps.
    pub resource_keys: Vec<String>,
}

impl Pod {
    /// Creates a pod with the given demand.
    pub fn new(demand: Resources) -> Self {
        Self { demand }
    }
}

impl Node {
    /// Creates a node with the given capacity.
    pub fn new(capacity: Resources) -> Self {
        Self { capacity }
    }
}

impl Problem {
    /// Creates an empty problem over the given resource names.
    pub fn new<I, S>(resource_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pods: Vec::new(),
            nodes: Vec::new(),
            resource_keys: resource_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds a pod.
    pub fn with_pod(mut self, pod: Pod) -> Self {
        self.pods.push(pod);
        self
    }

    /// Adds several pods.
    pub fn with_pods(mut self, pods: impl IntoIterator<Item = Pod>) -> Self {
        self.pods.extend(pods);
        self
    }

    /// Adds a node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds several nodes.
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Number of pods.
    #[inline]
    pub fn pod_count(&self) -> usize {
        self.pods.len()
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of considered resource names.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.resource_keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_builder() {
        let p = Problem::new(["cpu"])
            .with_pods(vec![
                Pod::new(Resources::new().with("cpu", 1.0)),
                Pod::new(Resources::new().with("cpu", 2.0)),
            ])
            .with_node(Node::new(Resources::new().with("cpu", 4.0)));

        assert_eq!(p.pod_count(), 2);
        assert_eq!(p.node_count(), 1);
        assert_eq!(p.key_count(), 1);
        assert_eq!(p.resource_keys, vec!["cpu".to_string()]);
    }

    #[test]
    fn test_problem_from_json() {
        let json = r#"{
            "pods": [{"demand": {"cpu": 500, "memory": 1024}}],
            "nodes": [{"capacity": {"cpu": 2000}}],
            "resource_keys": ["cpu", "memory"]
        }"#;
        let p: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(p.pod_count(), 1);
        assert!((p.pods[0].demand.get("memory") - 1024.0).abs() < 1e-10);
        assert_eq!(p.nodes[0].capacity.get("memory"), 0.0);
    }
}
