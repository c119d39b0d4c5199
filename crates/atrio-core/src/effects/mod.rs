//! Effect Trait Definitions
//!
//! Pure trait definitions for all side-effect operations in Atrio. This
//! module defines **what** effects can be performed; handlers in
//! `atrio-effects` define **how**.
//!
//! Two seams exist:
//!
//! - **Time** (`PhysicalTimeEffects`): wall-clock reads and sleeps, so the
//!   verification-expiry countdown can run against a simulated clock in tests.
//! - **Account API** (`AccountApiEffects`): the HTTPS/JSON endpoints consumed
//!   by the verification surface, so workflows can run against a scripted
//!   mock without a backend.
//!
//! All effect-using code is parameterized by these traits, enabling
//! deterministic testing and flexible handler composition.

pub mod account;
pub mod time;

// Re-export core effect traits
pub use account::{
    AccountApiEffects, ApiError, AuthStatusRecord, GroupStats, SelfieImage, SelfieStatus,
    TotpProvision, TotpVerification, VerificationReceipt,
};
pub use time::{PhysicalTimeEffects, TimeError};
