//! Error types.

use thiserror::Error;

/// Errors from policy name lookup.
///
/// The optimizer itself never fails; this is the only error surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The name matches no known policy. The lookup still yields the
    /// policy's documented fallback.
    #[error("undefined policy: {name} (falling back to '{fallback}')")]
    Undefined {
        /// Name as given by the caller.
        name: String,
        /// Policy name used instead.
        fallback: &'static str,
    },
}

/// Result alias for policy lookups.
pub type Result<T> = std::result::Result<T, PolicyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_input_and_fallback() {
        let err = PolicyError::Undefined {
            name: "lifo".into(),
            fallback: "fair",
        };
        assert_eq!(err.to_string(), "undefined policy: lifo (falling back to 'fair')");
    }
}
