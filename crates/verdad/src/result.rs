//! Result and error types for Verdad.

use thiserror::Error;

/// Result type for Verdad operations
pub type VerdadResult<T> = Result<T, VerdadError>;

/// Errors that can occur while verifying the rendered surface
#[derive(Debug, Error)]
pub enum VerdadError {
    /// Row/element lookup resolved to zero or multiple matches
    #[error("Lookup failed for {selector}: {matches} matches (expected exactly 1)")]
    Lookup {
        /// Human-readable selector description
        selector: String,
        /// Number of matches found
        matches: usize,
    },

    /// An invariant did not hold on the rendered surface
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Expected/actual mismatch description
        message: String,
    },

    /// A wait-for-render condition was not met in time
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waiting_for: String,
    },

    /// Product record rejected at construction
    #[error("Invalid product: {message}")]
    InvalidProduct {
        /// Validation failure description
        message: String,
    },

    /// Interaction rejected by the surface (e.g. clicking a disabled control)
    #[error("Interaction failed: {message}")]
    Interaction {
        /// What the surface refused and why
        message: String,
    },

    /// JSON error (trace export)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VerdadError {
    /// Shorthand for an assertion failure with an expected/actual pair.
    #[must_use]
    pub fn mismatch(what: &str, expected: impl std::fmt::Display, actual: impl std::fmt::Display) -> Self {
        Self::AssertionFailed {
            message: format!("{what}: expected {expected}, got {actual}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_message() {
        let err = VerdadError::Lookup {
            selector: "row containing 'Invisible Pen'".to_string(),
            matches: 0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Invisible Pen"));
        assert!(msg.contains("0 matches"));
    }

    #[test]
    fn test_timeout_error_message() {
        let err = VerdadError::Timeout {
            ms: 5000,
            waiting_for: "quantity to read 2".to_string(),
        };
        assert!(err.to_string().contains("5000ms"));
        assert!(err.to_string().contains("quantity to read 2"));
    }

    #[test]
    fn test_mismatch_helper() {
        let err = VerdadError::mismatch("cart total", "9999.99", "0.00");
        assert!(err.to_string().contains("expected 9999.99"));
        assert!(err.to_string().contains("got 0.00"));
    }
}
