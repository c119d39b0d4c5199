//! Real time effect handler for production use

use async_trait::async_trait;
use atrio_core::effects::{PhysicalTimeEffects, TimeError};
use atrio_core::PhysicalTime;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Real clock handler backed by the system clock and the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    /// Create a new real clock handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for RealClock {
    async fn physical_time(&self) -> Result<PhysicalTime, TimeError> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TimeError::ClockUnavailable {
                reason: format!("system clock is before Unix epoch: {}", e),
            })?;
        Ok(PhysicalTime::from_ms(since_epoch.as_millis() as u64))
    }

    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_physical_time_is_past_2020() {
        let clock = RealClock::new();
        let now = clock.physical_time().await.unwrap();
        // 2020-01-01T00:00:00Z in milliseconds
        assert!(now.ts_ms > 1_577_836_800_000);
    }

    #[tokio::test]
    async fn test_sleep_returns() {
        let clock = RealClock::new();
        clock.sleep_ms(1).await.unwrap();
    }
}
