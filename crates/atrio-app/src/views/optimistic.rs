//! Optimistic update cell for in-flight mutations.
//!
//! Frontends show spinners and inline failures off this cell instead of
//! tracking request lifecycles themselves.

use serde::{Deserialize, Serialize};

/// Lifecycle of one optimistic mutation.
///
/// The cell moves `Idle → Pending → Applied | Rejected` and back to `Idle`
/// on reset. A rejected cell keeps the failure message so the frontend can
/// render it inline next to the control that triggered the mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Optimistic<T> {
    /// No mutation in flight
    #[default]
    Idle,
    /// Mutation dispatched, server outcome unknown
    Pending,
    /// Server confirmed the mutation
    Applied(T),
    /// Server rejected the mutation
    Rejected(String),
}

impl<T> Optimistic<T> {
    /// Mark a mutation as dispatched.
    pub fn begin(&mut self) {
        *self = Self::Pending;
    }

    /// Record server confirmation.
    pub fn resolve(&mut self, value: T) {
        *self = Self::Applied(value);
    }

    /// Record server rejection with a displayable reason.
    pub fn reject(&mut self, reason: impl Into<String>) {
        *self = Self::Rejected(reason.into());
    }

    /// Return to idle, clearing any outcome.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Whether a mutation is currently in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the last mutation was confirmed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Whether the last mutation was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Rejection reason, if the last mutation was rejected.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}
