//! Categorized application errors
//!
//! Provides structured error types that enable:
//! - Categorized error handling (validation vs network vs auth)
//! - Appropriate alert severity routing
//! - Recovery hints for retryable failures

use std::fmt;

use atrio_core::effects::ApiError;

// Re-export AlertLevel from views/alerts (single source of truth)
pub use crate::views::alerts::AlertLevel;
use crate::views::alerts::AlertState;

/// Categorized application errors
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    /// User input failed validation before any request was made
    Validation {
        /// Which input field was rejected
        field: &'static str,
        /// What was wrong with it
        message: String,
    },
    /// A request failed in transit or was rejected by the server
    Network {
        /// Description of the failure
        message: String,
        /// Whether a retry of the same operation could succeed
        recoverable: bool,
    },
    /// The bearer token was rejected
    Auth {
        /// Context for the rejection
        message: String,
    },
    /// Internal errors (unexpected conditions)
    Internal {
        /// Description of the unexpected condition
        message: String,
    },
}

impl AppError {
    /// Create a validation error for a named input field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>, recoverable: bool) -> Self {
        Self::Network {
            message: message.into(),
            recoverable,
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the appropriate alert severity for this error
    pub fn alert_level(&self) -> AlertLevel {
        match self {
            Self::Validation { .. } => AlertLevel::Info,
            Self::Network { recoverable, .. } => {
                if *recoverable {
                    AlertLevel::Warning
                } else {
                    AlertLevel::Error
                }
            }
            Self::Auth { .. } => AlertLevel::Error,
            Self::Internal { .. } => AlertLevel::Error,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Network { recoverable, .. } => *recoverable,
            Self::Auth { .. } => false,
            Self::Internal { .. } => false,
        }
    }

    /// Get a short error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Auth { .. } => "AUTH_REJECTED",
            Self::Internal { .. } => "INTERNAL",
        }
    }

    /// Convert into the alert banner shown to the user
    pub fn to_alert(&self) -> AlertState {
        AlertState::new(self.alert_level(), self.code(), self.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Invalid {}: {}", field, message)
            }
            Self::Network {
                message,
                recoverable,
            } => {
                if *recoverable {
                    write!(f, "Network error (retryable): {}", message)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Auth { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let recoverable = err.is_transient();
        match err {
            ApiError::Unauthorized => Self::auth("bearer token rejected"),
            ApiError::Decode { message } => {
                Self::internal(format!("malformed server response: {}", message))
            }
            other => Self::network(other.to_string(), recoverable),
        }
    }
}
