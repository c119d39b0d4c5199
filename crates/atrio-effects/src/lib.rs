//! # Atrio Effects
//!
//! Effect handler implementations for the Atrio application core.
//!
//! This crate provides concrete implementations of the effect traits defined
//! in `atrio-core`:
//!
//! - **Production handlers**: real HTTPS/JSON API access and system-clock time
//! - **Test handlers**: scripted API responses and a virtual clock for
//!   deterministic tests
//!
//! Handlers are deliberately thin. Validation, state transitions, and retry
//! policy all live above this crate; a handler's only job is to perform the
//! effect and report what happened.

#![forbid(unsafe_code)]

pub mod api;
pub mod time;

pub use api::{CallCounts, HttpAccountApi, MockAccountApi};
pub use time::{RealClock, SimulatedClock};
