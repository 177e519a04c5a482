//! Single-step perturbations of an assignment.
//!
//! Two move types, chosen by a fair coin:
//!
//! - **Move**: one random pod goes to a different random node.
//! - **Swap**: two random pods exchange nodes.
//!
//! A single-pod assignment always uses Move. A single-node problem makes
//! Move a no-op, since no different node exists to redraw into.

use rand::Rng;

use crate::models::Assignment;

/// Kind of perturbation applied by [`neighbor_with_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// One pod reassigned to another node.
    Move,
    /// Two pods exchanged their nodes.
    Swap,
    /// Nothing changed (same pod drawn twice for a swap, fewer than two
    /// nodes for a move, or no pods).
    Noop,
}

/// Returns a perturbed copy of `assignment`. The input is not modified.
pub fn neighbor<R: Rng>(rng: &mut R, assignment: &Assignment, node_count: usize) -> Assignment {
    neighbor_with_kind(rng, assignment, node_count).0
}

/// Like [`neighbor`], also reporting which perturbation was applied.
pub fn neighbor_with_kind<R: Rng>(
    rng: &mut R,
    assignment: &Assignment,
    node_count: usize,
) -> (Assignment, MoveKind) {
    let mut out = assignment.clone();
    let pods = out.len();
    if pods == 0 {
        return (out, MoveKind::Noop);
    }

    if rng.random::<f64>() < 0.5 || pods == 1 {
        let pod = rng.random_range(0..pods);
        if node_count < 2 {
            return (out, MoveKind::Noop);
        }
        let from = out.node_of(pod);
        let to = loop {
            let candidate = rng.random_range(0..node_count);
            if Some(candidate) != from {
                break candidate;
            }
        };
        out.place(pod, to);
        (out, MoveKind::Move)
    } else {
        let i = rng.random_range(0..pods);
        let j = rng.random_range(0..pods);
        if i == j {
            return (out, MoveKind::Noop);
        }
        out.swap(i, j);
        (out, MoveKind::Swap)
    }
}
