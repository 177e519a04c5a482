//! Assignment (solution) model.
//!
//! An assignment maps every pod, by position, to a node index or to
//! "unplaced". The cost model tolerates unplaced slots and indices that
//! are out of range; both are skipped during aggregation.

use serde::{Deserialize, Serialize};

/// Signed sentinel used by integer-based callers for an unplaced pod.
pub const UNPLACED: i64 = -1;

/// Pod → node mapping, aligned by position with [`Problem::pods`].
///
/// [`Problem::pods`]: super::Problem::pods
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(Vec<Option<usize>>);

impl Assignment {
    /// Creates an assignment with every pod unplaced.
    pub fn unplaced(pod_count: usize) -> Self {
        Self(vec![None; pod_count])
    }

    /// Creates an assignment from node indices (every pod placed).
    pub fn from_nodes(nodes: impl IntoIterator<Item = usize>) -> Self {
        Self(nodes.into_iter().map(Some).collect())
    }

    /// Creates an assignment from the signed form, where any negative
    /// value means unplaced.
    ///
    /// ```
    /// use u_placement::models::Assignment;
    ///
    /// let a = Assignment::from_signed(&[0, -1, 2]);
    /// assert_eq!(a.node_of(1), None);
    /// assert_eq!(a.to_signed(), vec![0, -1, 2]);
    /// ```
    pub fn from_signed(indices: &[i64]) -> Self {
        Self(
            indices
                .iter()
                .map(|&i| usize::try_from(i).ok())
                .collect(),
        )
    }

    /// Signed form: node index, or [`UNPLACED`] for unplaced pods.
    pub fn to_signed(&self) -> Vec<i64> {
        self.0
            .iter()
            .map(|slot| match slot {
                Some(n) => i64::try_from(*n).unwrap_or(i64::MAX),
                None => UNPLACED,
            })
            .collect()
    }

    /// Node of a pod (`None` if unplaced or the pod index is out of range).
    #[inline]
    pub fn node_of(&self, pod: usize) -> Option<usize> {
        self.0.get(pod).copied().flatten()
    }

    /// Places a pod on a node.
    #[inline]
    pub fn place(&mut self, pod: usize, node: usize) {
        self.0[pod] = Some(node);
    }

    /// Marks a pod as unplaced.
    #[inline]
    pub fn unplace(&mut self, pod: usize) {
        self.0[pod] = None;
    }

    /// Exchanges the slots of two pods.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// Number of slots (equals the pod count of the problem it solves).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Slots in pod order.
    pub fn slots(&self) -> &[Option<usize>] {
        &self.0
    }

    /// Number of pods placed on some node.
    pub fn placed_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_some()).count()
    }

    /// Pods placed on `node`, in pod order.
    pub fn pods_on(&self, node: usize) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot == Some(node))
            .map(|(pod, _)| pod)
            .collect()
    }
}

impl From<Vec<Option<usize>>> for Assignment {
    fn from(slots: Vec<Option<usize>>) -> Self {
        Self(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unplaced_assignment() {
        let a = Assignment::unplaced(3);
        assert_eq!(a.len(), 3);
        assert_eq!(a.placed_count(), 0);
        assert_eq!(a.to_signed(), vec![-1, -1, -1]);
    }

    #[test]
    fn test_place_and_swap() {
        let mut a = Assignment::unplaced(2);
        a.place(0, 4);
        a.swap(0, 1);
        assert_eq!(a.node_of(0), None);
        assert_eq!(a.node_of(1), Some(4));
        assert_eq!(a.node_of(7), None);
    }

    #[test]
    fn test_unplace() {
        let mut a = Assignment::from_nodes([2, 0]);
        a.unplace(0);
        assert_eq!(a.to_signed(), vec![UNPLACED, 0]);
        assert_eq!(a.placed_count(), 1);
        assert!(a.pods_on(2).is_empty());
    }

    #[test]
    fn test_pods_on() {
        let a = Assignment::from_nodes([1, 0, 1]);
        assert_eq!(a.pods_on(1), vec![0, 2]);
        assert!(a.pods_on(2).is_empty());
    }

    #[test]
    fn test_any_negative_is_unplaced() {
        let a = Assignment::from_signed(&[-7, 3]);
        assert_eq!(a.slots(), &[None, Some(3)]);
    }

    #[test]
    fn test_serde_uses_null_for_unplaced() {
        let a = Assignment::from_signed(&[1, -1]);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[1,null]");
    }
}
