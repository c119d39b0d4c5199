//! # Core Application Module
//!
//! This module contains the session-facing vocabulary:
//!
//! - [`SettingsIntent`]: User actions dispatched to the session actor
//! - [`AppConfig`]: Application configuration with validation

mod config;
mod intent;

pub use config::{ApiConfig, AppConfig, ObjectiveTargets, PollingConfig};
pub use intent::SettingsIntent;
