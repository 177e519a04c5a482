//! Input validation for placement problems.
//!
//! The optimizer accepts any input and never fails; these checks are for
//! callers that want to reject malformed problems up front. Detects:
//! - Duplicate or empty resource keys
//! - Negative or non-finite demand/capacity quantities
//! - Pods with nowhere to go (no nodes)
//! - Assignments of the wrong length or with out-of-range node indices

use std::collections::HashSet;

use crate::models::{Assignment, Problem, Resources};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A resource key is listed twice.
    DuplicateKey,
    /// A resource key is the empty string.
    EmptyKey,
    /// A demand or capacity quantity is negative, NaN, or infinite.
    InvalidQuantity,
    /// Pods exist but there is no node to place them on.
    NoNodes,
    /// Assignment length differs from the pod count.
    LengthMismatch,
    /// Assignment references a node index that does not exist.
    NodeOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a placement problem.
///
/// Checks:
/// 1. No duplicate resource keys
/// 2. No empty resource keys
/// 3. All considered quantities are finite and non-negative
/// 4. At least one node when there are pods
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for key in &problem.resource_keys {
        if key.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyKey,
                "Empty resource key",
            ));
        }
        if !seen.insert(key.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate resource key: {key}"),
            ));
        }
    }

    for (i, pod) in problem.pods.iter().enumerate() {
        check_quantities(&pod.demand, &problem.resource_keys, &mut errors, || {
            format!("Pod {i} demand")
        });
    }
    for (i, node) in problem.nodes.iter().enumerate() {
        check_quantities(&node.capacity, &problem.resource_keys, &mut errors, || {
            format!("Node {i} capacity")
        });
    }

    if problem.nodes.is_empty() && !problem.pods.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoNodes,
            format!("{} pods but no nodes", problem.pod_count()),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates an assignment against the problem it claims to solve.
///
/// Unplaced slots are allowed.
pub fn validate_assignment(problem: &Problem, assignment: &Assignment) -> ValidationResult {
    let mut errors = Vec::new();

    if assignment.len() != problem.pod_count() {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "Assignment has {} slots for {} pods",
                assignment.len(),
                problem.pod_count()
            ),
        ));
    }

    for (pod, slot) in assignment.slots().iter().enumerate() {
        if let Some(node) = slot {
            if *node >= problem.node_count() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NodeOutOfRange,
                    format!(
                        "Pod {pod} assigned to node {node}, but only {} nodes exist",
                        problem.node_count()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_quantities(
    resources: &Resources,
    keys: &[String],
    errors: &mut Vec<ValidationError>,
    owner: impl Fn() -> String,
) {
    for key in keys {
        let q = resources.get(key);
        if !q.is_finite() || q < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantity,
                format!("{} has invalid quantity {q} for '{key}'", owner()),
            ));
        }
    }
}
