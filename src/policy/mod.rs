//! Placement policy registry.
//!
//! Maps configuration strings to policy identifiers. Lookups never leave
//! the caller without a policy: an unknown name yields the documented
//! fallback together with a [`PolicyError`], so configuration loading can
//! either fail or continue with the default.
//!
//! | Family | Names | Empty / unknown |
//! |--------|-------|-----------------|
//! | [`SortPolicy`] | `fifo`, `fair`, `sa` (`stateaware` → `fifo`, deprecated) | `fifo` / `undefined` |
//! | [`NodeSortingPolicy`] | `binpacking`, `fair`, `sa` | `fair` / `fair` |
//!
//! # Usage
//!
//! ```
//! use u_placement::policy::{NamedPolicy, SortPolicy};
//!
//! let (policy, err) = SortPolicy::lookup("sa");
//! assert_eq!(policy, SortPolicy::SimulatedAnnealing);
//! assert!(err.is_none());
//!
//! let (policy, err) = SortPolicy::lookup("lifo");
//! assert_eq!(policy, SortPolicy::Undefined);
//! assert!(err.is_some());
//! ```
//!
//! Deserialization goes through the same lookup, so configuration files get
//! the alias and fallback rules too. An unrecognized name deserializes to
//! the fallback and is logged at `warn!` rather than rejected.

use tracing::warn;

mod annealing;
mod node_sorting;
mod sort;

pub use annealing::SaPolicy;
pub use node_sorting::NodeSortingPolicy;
pub use sort::SortPolicy;

pub use crate::error::PolicyError;

/// A policy family addressable by name.
pub trait NamedPolicy: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// Every identifier that has a canonical name of its own.
    const ALL: &'static [Self];

    /// Canonical configuration name.
    fn name(&self) -> &'static str;

    /// Resolves a name, returning the fallback and an error when the name
    /// is not recognized.
    fn lookup(name: &str) -> (Self, Option<PolicyError>);

    /// Strict variant of [`lookup`](Self::lookup).
    fn parse(name: &str) -> crate::error::Result<Self> {
        match Self::lookup(name) {
            (_, Some(err)) => Err(err),
            (policy, None) => Ok(policy),
        }
    }
}

/// Lenient resolution used when a policy is read from configuration.
pub(crate) fn resolve_configured<P: NamedPolicy>(name: &str) -> P {
    let (policy, err) = P::lookup(name);
    if let Some(err) = err {
        warn!(%err, "unrecognized policy name in configuration");
    }
    policy
}
