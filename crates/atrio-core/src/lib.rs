//! Atrio Core - Interface Layer Foundation
//!
//! This crate provides the foundational types and effect interfaces shared by
//! every layer of the Atrio application core. It contains pure type
//! definitions and trait signatures only; handlers live in `atrio-effects`
//! and business logic lives in `atrio-app`.
//!
//! # Contents
//!
//! - `errors`: the unified [`AtrioError`] type and `Result` alias
//! - `time`: wall-clock instants in milliseconds plus ISO-8601 conversion
//! - `effects`: effect trait definitions (`PhysicalTimeEffects`,
//!   `AccountApiEffects`) with their request/response records
//!
//! All effect-using code is parameterized by these traits, which keeps the
//! application core deterministic under test: production wires real handlers,
//! tests wire simulated clocks and scripted API mocks.

#![forbid(unsafe_code)]

// === Core Modules ===

/// Unified error handling
pub mod errors;

/// Wall-clock time utilities
pub mod time;

/// Pure effect interfaces (no implementations)
pub mod effects;

// === Public API Re-exports ===

pub use errors::{AtrioError, Result};
pub use time::PhysicalTime;
