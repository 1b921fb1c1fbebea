//! Stock Alerts Clock Infrastructure
//!
//! Provides time sources for price updates that arrive without a timestamp
//! and for record creation times:
//!
//! - [`SystemClock`]: wall-clock time for production
//! - [`ManualClock`]: time that only moves when told to, for tests and replays
//!
//! ## Usage
//!
//! ```ignore
//! use stockalerts_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::new(None);
//! let t0 = clock.now();
//! clock.advance(Duration::minutes(5));
//! assert_eq!(clock.now() - t0, Duration::minutes(5));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use stockalerts_ports::Clock;
