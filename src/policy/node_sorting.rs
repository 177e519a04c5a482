//! Node sorting policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{resolve_configured, NamedPolicy};
use crate::error::PolicyError;

/// Order in which candidate nodes are tried for an allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NodeSortingPolicy {
    /// Fill the most utilized nodes first.
    BinPacking,
    /// Spread load evenly. Default when unset or unknown.
    #[default]
    Fair,
    /// Assignment optimized by simulated annealing.
    #[serde(rename = "sa")]
    SimulatedAnnealing,
}

impl NamedPolicy for NodeSortingPolicy {
    const ALL: &'static [Self] = &[Self::BinPacking, Self::Fair, Self::SimulatedAnnealing];

    fn name(&self) -> &'static str {
        match self {
            Self::BinPacking => "binpacking",
            Self::Fair => "fair",
            Self::SimulatedAnnealing => "sa",
        }
    }

    fn lookup(name: &str) -> (Self, Option<PolicyError>) {
        match name {
            "" | "fair" => (Self::Fair, None),
            "binpacking" => (Self::BinPacking, None),
            "sa" => (Self::SimulatedAnnealing, None),
            other => (
                Self::Fair,
                Some(PolicyError::Undefined {
                    name: other.to_string(),
                    fallback: Self::Fair.name(),
                }),
            ),
        }
    }
}

impl fmt::Display for NodeSortingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for NodeSortingPolicy {
    fn from(name: String) -> Self {
        resolve_configured(&name)
    }
}

impl FromStr for NodeSortingPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_fair() {
        assert_eq!(NodeSortingPolicy::lookup(""), (NodeSortingPolicy::Fair, None));
    }

    #[test]
    fn test_unknown_falls_back_to_fair() {
        let (p, err) = NodeSortingPolicy::lookup("stateaware");
        assert_eq!(p, NodeSortingPolicy::Fair);
        assert!(err.is_some());
    }

    #[test]
    fn test_binpacking() {
        assert_eq!(
            "binpacking".parse::<NodeSortingPolicy>(),
            Ok(NodeSortingPolicy::BinPacking)
        );
        assert_eq!(NodeSortingPolicy::BinPacking.to_string(), "binpacking");
    }

    #[test]
    fn test_serde_goes_through_lookup() {
        let json = serde_json::to_string(&NodeSortingPolicy::BinPacking).unwrap();
        assert_eq!(json, r#""binpacking""#);
        let p: NodeSortingPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(p, NodeSortingPolicy::BinPacking);

        let p: NodeSortingPolicy = serde_json::from_str("\"\"").unwrap();
        assert_eq!(p, NodeSortingPolicy::Fair);
        let p: NodeSortingPolicy = serde_json::from_str(r#""spread""#).unwrap();
        assert_eq!(p, NodeSortingPolicy::Fair);
    }
}
