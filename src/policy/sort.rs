//! Application sort policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{resolve_configured, NamedPolicy};
use crate::error::PolicyError;

/// Deprecated alias accepted for [`SortPolicy::Fifo`].
pub const DEPRECATED_STATE_AWARE: &str = "stateaware";

/// Order in which pending applications are considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortPolicy {
    /// First in, first out by submission time. Default when unset.
    #[default]
    Fifo,
    /// Fair share based on usage.
    Fair,
    /// Placement optimized by simulated annealing.
    #[serde(rename = "sa")]
    SimulatedAnnealing,
    /// Not initialised, or the name failed to parse.
    Undefined,
}

impl NamedPolicy for SortPolicy {
    const ALL: &'static [Self] = &[Self::Fifo, Self::Fair, Self::SimulatedAnnealing];

    fn name(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Fair => "fair",
            Self::SimulatedAnnealing => "sa",
            Self::Undefined => "undefined",
        }
    }

    fn lookup(name: &str) -> (Self, Option<PolicyError>) {
        match name {
            "" | "fifo" => (Self::Fifo, None),
            "fair" => (Self::Fair, None),
            "sa" => {
                info!("using simulated annealing sort policy");
                (Self::SimulatedAnnealing, None)
            }
            DEPRECATED_STATE_AWARE => {
                warn!(
                    target: "u_placement::deprecation",
                    "sort policy 'stateaware' is deprecated; using 'fifo' instead"
                );
                (Self::Fifo, None)
            }
            other => (
                Self::Undefined,
                Some(PolicyError::Undefined {
                    name: other.to_string(),
                    fallback: Self::Undefined.name(),
                }),
            ),
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for SortPolicy {
    fn from(name: String) -> Self {
        resolve_configured(&name)
    }
}

impl FromStr for SortPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
