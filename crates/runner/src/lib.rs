//! Stock Alerts Runner
//!
//! Runs the alerting pipeline against a price feed:
//!
//! - **Config**: JSON configuration with evaluator policy and a watchlist
//! - **Bootstrap**: Builds the store, emitter, and evaluator; registers the watchlist
//! - **Feed**: Parses JSON-lines price updates
//! - **Processor**: Applies updates in order and keeps running totals
//!
//! ## Architecture
//!
//! ```text
//!   config.json ──► Bootstrap ──► register watchlist
//!                                        │
//!   feed (file/stdin)                    ▼
//!        │ lines          ┌───────────────────────────┐
//!        └──────────────► │      Feed Processor       │
//!                         │  parse ─► evaluator ─► stats
//!                         └─────────────┬─────────────┘
//!                                       │ breaches
//!                                       ▼
//!                             ┌───────────────────┐
//!                             │  Emitter (log /   │
//!                             │  JSON lines)      │
//!                             └───────────────────┘
//! ```

pub mod bootstrap;
pub mod config;
pub mod emitter;
pub mod feed;
pub mod processor;

// Re-export main types
pub use bootstrap::{build_emitter, build_evaluator, register_watchlist};
pub use config::{AlertsConfig, ConfigError, EmitterKind, WatchEntry};
pub use emitter::JsonLinesEmitter;
pub use feed::{FeedError, parse_line};
pub use processor::{FeedProcessor, FeedStats};
