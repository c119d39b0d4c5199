//! Application Configuration
//!
//! Configuration types for the verification session: API endpoint settings,
//! polling cadence, and the progress objective targets.

use atrio_core::{AtrioError, Result};
use serde::{Deserialize, Serialize};

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the account service
    pub base_url: String,

    /// Bearer token presented on every request
    pub bearer_token: String,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.atrio.app".to_string(),
            bearer_token: String::new(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Polling cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Interval between expiry countdown evaluations in milliseconds
    pub countdown_tick_ms: u64,

    /// Interval between background progress refreshes in milliseconds
    pub progress_refresh_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            countdown_tick_ms: 1_000,
            progress_refresh_ms: 30_000,
        }
    }
}

/// Completion targets for the verification objectives
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObjectiveTargets {
    /// Posts the account must open
    pub posts_opened: u64,

    /// Posts the account must publish
    pub posts_published: u64,

    /// Channels the account must join
    pub channels_joined: u64,

    /// Active members the account's group must reach
    pub group_members_active: u64,
}

impl Default for ObjectiveTargets {
    fn default() -> Self {
        Self {
            posts_opened: 50,
            posts_published: 5,
            channels_joined: 3,
            group_members_active: 10,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Polling cadence
    #[serde(default)]
    pub polling: PollingConfig,

    /// Objective targets
    #[serde(default)]
    pub objectives: ObjectiveTargets,
}

impl AppConfig {
    /// Validate the configuration before a session starts.
    ///
    /// Sessions refuse to spawn with a config that would stall polling or
    /// make an objective unreachable.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AtrioError::invalid("api.base_url must not be empty"));
        }
        if self.api.request_timeout_ms == 0 {
            return Err(AtrioError::invalid("api.request_timeout_ms must be > 0"));
        }
        if self.polling.countdown_tick_ms == 0 {
            return Err(AtrioError::invalid("polling.countdown_tick_ms must be > 0"));
        }
        if self.polling.progress_refresh_ms == 0 {
            return Err(AtrioError::invalid(
                "polling.progress_refresh_ms must be > 0",
            ));
        }
        if self.polling.progress_refresh_ms < self.polling.countdown_tick_ms {
            return Err(AtrioError::invalid(
                "polling.progress_refresh_ms must be >= polling.countdown_tick_ms",
            ));
        }
        let targets = &self.objectives;
        if targets.posts_opened == 0
            || targets.posts_published == 0
            || targets.channels_joined == 0
            || targets.group_members_active == 0
        {
            return Err(AtrioError::invalid("objective targets must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(AtrioError::Invalid { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_intervals() {
        let mut config = AppConfig::default();
        config.polling.countdown_tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.polling.progress_refresh_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_refresh_faster_than_tick() {
        let mut config = AppConfig::default();
        config.polling.countdown_tick_ms = 5_000;
        config.polling.progress_refresh_ms = 1_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_objective_target() {
        let mut config = AppConfig::default();
        config.objectives.channels_joined = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api": {"base_url": "https://example.test", "bearer_token": "tok", "request_timeout_ms": 500}}"#)
                .unwrap();
        assert_eq!(config.api.base_url, "https://example.test");
        assert_eq!(config.polling.countdown_tick_ms, 1_000);
        assert_eq!(config.objectives.posts_opened, 50);
    }
}
