use chrono::Utc;
use std::sync::Arc;
use stockalerts_core::Timestamp;
use stockalerts_ports::Clock;

/// Wall-clock time
///
/// Stamps live feed updates that arrive without a timestamp and records the
/// registration time of new symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }

    /// Shared handle, as the store and feed processor take it
    pub fn shared() -> Arc<dyn Clock> {
        Arc::new(Self)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
