//! Stock Alerts Ports
//!
//! Port definitions (traits) for the stock alerts system.
//! These define the boundaries between the alerting logic and infrastructure:
//! where records are kept, where alerts go, and where time comes from.

mod clock;
mod emitter;
mod error;
mod repository;

pub use clock::Clock;
pub use emitter::AlertEmitter;
pub use error::{AlertError, AlertResult, EmitError};
pub use repository::StockRepository;
