//! Stock Alerts Evaluator
//!
//! Turns raw price updates into edge-triggered alerts:
//!
//! ```text
//! Price Feed ──► (symbol, price, timestamp)
//!                        │
//!                        ▼
//!          ┌───────────────────────────┐
//!          │        Evaluator          │
//!          │  store.apply_price(...)   │──► record lock: state committed,
//!          │                           │    transition decided
//!          │  classify transition      │
//!          └────────────┬──────────────┘
//!                       │ BreachOccurred (and Cleared, if enabled)
//!                       ▼   outside every lock, bounded by emit_timeout
//!               ┌───────────────┐
//!               │ AlertEmitter  │──► log / broadcast channel / stdout ...
//!               └───────────────┘
//! ```
//!
//! An alert fires once per breach episode, not on every update while the
//! price stays on the alerting side.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockalerts_evaluator::{Evaluator, EvaluatorConfig, LogEmitter};
//!
//! let evaluator = Evaluator::new(store, Arc::new(LogEmitter::new()), EvaluatorConfig::default());
//! evaluator.register("AAPL", dec!(150)).await?;
//!
//! let transition = evaluator.on_price_update(&PriceUpdate::new("AAPL", dec!(151), now)).await?;
//! assert_eq!(transition, Transition::BreachOccurred);
//! ```

pub mod config;
pub mod emitters;
pub mod evaluator;

// Re-export main types
pub use config::EvaluatorConfig;
pub use emitters::{BroadcastEmitter, LogEmitter};
pub use evaluator::Evaluator;
