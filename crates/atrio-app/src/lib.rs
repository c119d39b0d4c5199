//! # Atrio App
//!
//! Portable headless application core for the Atrio account-verification
//! surface. Frontends (mobile, terminal, web) render the view-state types
//! exposed here and dispatch intents; every state mutation happens inside
//! the session actor, which owns the screen state for the lifetime of a
//! screen mount.
//!
//! ## Architecture
//!
//! - [`views`]: serializable view-state types (marked-text segments, the
//!   account auth machine, the verification progress board, optimistic
//!   update cells, and alerts)
//! - [`workflows`]: portable business logic, generic over the effect traits
//!   in `atrio-core`
//! - [`session`]: the single-writer settings-session actor and its
//!   cloneable handle
//! - [`core`]: configuration and the intent vocabulary
//! - [`errors`]: categorized application errors with alert routing

#![forbid(unsafe_code)]

pub mod core;
pub mod errors;
pub mod session;
pub mod views;
pub mod workflows;

pub use crate::core::{ApiConfig, AppConfig, ObjectiveTargets, PollingConfig, SettingsIntent};
pub use crate::errors::AppError;
pub use crate::session::{SettingsHandle, SettingsSession};
pub use crate::views::{
    parse_marked_text, AccountAuthState, AlertLevel, AlertState, ObjectiveKind, Optimistic,
    ProgressBoard, SegmentKind, TextSegment, TotpEnrollment, VerificationObjective,
    VerificationState,
};
