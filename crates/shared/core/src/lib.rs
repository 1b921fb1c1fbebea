//! Stock Alerts Core Domain
//!
//! Pure domain types for the stock alerts system.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Alert, AlertDirection, AlertKind, PriceApplication, PriceUpdate, StockRecord, Transition,
};
pub use values::{
    Price, StockId, Symbol, Timestamp, is_valid_price, is_valid_threshold, normalize_symbol,
};
