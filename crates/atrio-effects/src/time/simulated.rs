//! Simulated time effect handler for testing

use async_trait::async_trait;
use atrio_core::effects::{PhysicalTimeEffects, TimeError};
use atrio_core::PhysicalTime;
use std::sync::{Arc, Mutex};

/// Simulated clock for testing and simulation.
///
/// Cloning shares the underlying clock, so a test can hold one handle while
/// the session actor holds another. `sleep_ms` advances the virtual clock
/// instead of waiting, which lets countdown-driven logic run to completion
/// in microseconds of real time.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    /// Current simulated time in milliseconds
    current_time: Arc<Mutex<u64>>,
}

impl SimulatedClock {
    /// Create a new simulated clock starting at the given time
    pub fn new(start_time_ms: u64) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(start_time_ms)),
        }
    }

    /// Create a simulated clock starting at Unix epoch
    pub fn new_at_epoch() -> Self {
        Self::new(0)
    }

    /// Advance simulated time by the given duration
    pub fn advance_time(&self, duration_ms: u64) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration_ms;
    }

    /// Set the absolute simulated time
    pub fn set_time(&self, time_ms: u64) {
        let mut time = self.current_time.lock().unwrap();
        *time = time_ms;
    }

    /// Get the current simulated time (for testing)
    pub fn get_time(&self) -> u64 {
        *self.current_time.lock().unwrap()
    }

    /// Reset time to epoch (for testing)
    pub fn reset(&self) {
        self.set_time(0);
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new_at_epoch()
    }
}

#[async_trait]
impl PhysicalTimeEffects for SimulatedClock {
    async fn physical_time(&self) -> Result<PhysicalTime, TimeError> {
        Ok(PhysicalTime::from_ms(*self.current_time.lock().unwrap()))
    }

    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError> {
        // Advance virtual time immediately, then yield so concurrent tasks
        // observe the new time before the sleeper resumes.
        self.advance_time(ms);
        tokio::task::yield_now().await;
        Ok(())
    }
}
