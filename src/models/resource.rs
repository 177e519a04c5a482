//! Named resource quantities.
//!
//! A [`Resources`] value is an ordered mapping from resource name
//! (e.g. `"cpu"`, `"memory"`) to a non-negative quantity. The set of
//! names is open-ended; which names matter is decided per problem by
//! [`Problem::resource_keys`](super::Problem::resource_keys).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered mapping from resource name to quantity.
///
/// Reading a name that is not present yields `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resources(BTreeMap<String, f64>);

impl Resources {
    /// Creates an empty quantity map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets a quantity (builder style).
    pub fn with(mut self, name: impl Into<String>, quantity: f64) -> Self {
        self.0.insert(name.into(), quantity);
        self
    }

    /// Sets a quantity, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, quantity: f64) {
        self.0.insert(name.into(), quantity);
    }

    /// Quantity for a name (0.0 if absent).
    #[inline]
    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    /// Whether a name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Adds `quantity` to the current value of `name`.
    pub fn add(&mut self, name: &str, quantity: f64) {
        *self.0.entry(name.to_string()).or_insert(0.0) += quantity;
    }

    /// Iterates over (name, quantity) in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of named quantities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no quantity is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Resources {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_zero() {
        let r = Resources::new().with("cpu", 500.0);
        assert!((r.get("cpu") - 500.0).abs() < 1e-10);
        assert_eq!(r.get("gpu"), 0.0);
        assert!(!r.contains("gpu"));
    }

    #[test]
    fn test_add_accumulates() {
        let mut r = Resources::new();
        r.add("cpu", 60.0);
        r.add("cpu", 60.0);
        assert!((r.get("cpu") - 120.0).abs() < 1e-10);
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_set_replaces() {
        let mut r = Resources::new().with("cpu", 60.0);
        r.set("cpu", 10.0);
        r.set("memory", 256.0);
        assert!((r.get("cpu") - 10.0).abs() < 1e-10);
        assert!((r.get("memory") - 256.0).abs() < 1e-10);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let r: Resources = [("memory", 1024.0), ("cpu", 500.0)].into_iter().collect();
        let names: Vec<&str> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["cpu", "memory"]);
    }

    #[test]
    fn test_serde_as_plain_map() {
        let r = Resources::new().with("cpu", 2.0);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"cpu":2.0}"#);
        let back: Resources = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
