//! Alert banner state surfaced to the user.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// Informational, auto-dismissable.
    Info,
    /// Something degraded but the screen still works.
    Warning,
    /// An operation failed and the user should know.
    Error,
}

/// A single alert banner.
///
/// The session keeps at most one alert at a time; a new alert replaces the
/// previous one and `DismissAlert` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    /// Severity used by the frontend to pick banner styling.
    pub level: AlertLevel,
    /// Stable machine-readable code (e.g. "NETWORK_ERROR").
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl AlertState {
    /// Create an alert.
    pub fn new(level: AlertLevel, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            code: code.into(),
            message: message.into(),
        }
    }
}
