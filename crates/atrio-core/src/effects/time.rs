//! Physical time trait definitions
//!
//! These traits correspond to the wall-clock type defined in `crate::time`.
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `atrio-effects`
//! - **Usage**: expiry countdowns, session tick scheduling, timestamps
//!
//! The session layer never reads the system clock directly; it goes through
//! `PhysicalTimeEffects` so that TTL expiry can be driven by a simulated
//! clock under test.

use crate::time::PhysicalTime;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for time operations.
#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
pub enum TimeError {
    /// The underlying clock source could not produce a reading
    #[error("Clock unavailable: {reason}")]
    ClockUnavailable {
        /// Description of the clock failure
        reason: String,
    },
}

/// Wall-clock time provider.
///
/// `sleep_ms` is part of the trait so that handlers control how waiting
/// behaves: the real handler suspends on the runtime timer, the simulated
/// handler advances virtual time immediately.
#[async_trait]
pub trait PhysicalTimeEffects: Send + Sync {
    /// Current wall-clock instant.
    async fn physical_time(&self) -> Result<PhysicalTime, TimeError>;

    /// Suspend for the given number of milliseconds.
    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError>;
}

/// Blanket implementation for Arc<T> where T: PhysicalTimeEffects
#[async_trait]
impl<T: PhysicalTimeEffects + ?Sized> PhysicalTimeEffects for std::sync::Arc<T> {
    async fn physical_time(&self) -> Result<PhysicalTime, TimeError> {
        (**self).physical_time().await
    }

    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError> {
        (**self).sleep_ms(ms).await
    }
}
