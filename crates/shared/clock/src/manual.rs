use chrono::{Duration, Utc};
use parking_lot::RwLock;
use stockalerts_core::Timestamp;
use stockalerts_ports::Clock;
use std::sync::Arc;

/// Clock that only advances when explicitly moved
///
/// Used for deterministic tests and for replaying recorded feeds.
pub struct ManualClock {
    current_time: RwLock<Timestamp>,
}

impl ManualClock {
    /// Create a manual clock
    ///
    /// # Arguments
    /// * `initial_time` - Optional starting time. If None, uses current wall time.
    pub fn new(initial_time: Option<Timestamp>) -> Arc<Self> {
        Arc::new(Self {
            current_time: RwLock::new(initial_time.unwrap_or_else(Utc::now)),
        })
    }

    /// Advance the time by a specified duration
    pub fn advance(&self, duration: Duration) {
        *self.current_time.write() += duration;
    }

    /// Explicitly set the time
    ///
    /// Warning: This can move time backwards.
    pub fn set_time(&self, time: Timestamp) {
        *self.current_time.write() = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current_time.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
