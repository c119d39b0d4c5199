//! Unified error system for Atrio core
//!
//! This module provides a single, simple error type shared by all layers of
//! the application core. Seam-specific errors (time, remote API) live next to
//! their traits and convert into this type at the workflow boundary.

use serde::{Deserialize, Serialize};

/// Unified error type for all Atrio operations
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AtrioError {
    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Network or transport error
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl AtrioError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Standard Result type for Atrio operations
pub type Result<T> = std::result::Result<T, AtrioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AtrioError::invalid("test message");
        assert!(matches!(err, AtrioError::Invalid { .. }));
        assert_eq!(err.to_string(), "Invalid: test message");
    }

    #[test]
    fn test_display_includes_category() {
        assert_eq!(
            AtrioError::network("connection reset").to_string(),
            "Network error: connection reset"
        );
        assert_eq!(
            AtrioError::internal("channel closed").to_string(),
            "Internal error: channel closed"
        );
    }

    #[test]
    fn test_result_type() {
        fn test_function() -> Result<i32> {
            Ok(42)
        }

        let result = test_function();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }
}
