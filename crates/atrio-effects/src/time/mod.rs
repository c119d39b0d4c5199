//! Time effect handlers
//!
//! This module provides standard implementations of the `PhysicalTimeEffects`
//! trait defined in `atrio-core`. The session actor uses these to drive its
//! expiry countdown and progress polling.

pub mod real;
pub mod simulated;

pub use real::RealClock;
pub use simulated::SimulatedClock;
