//! Stock Alerts Store
//!
//! Authoritative in-memory mapping from symbol to [`StockRecord`].
//!
//! ## Locking
//!
//! ```text
//! DashMap<Symbol, Arc<Mutex<StockRecord>>>
//!     │                 │
//!     │                 └── record lock: serializes updates to ONE symbol
//!     └── shard lock: held only to insert, remove, or clone the Arc
//! ```
//!
//! A price update clones the record's `Arc` out of the map, drops the shard
//! lock, and only then takes the record lock. Updates to different symbols
//! therefore never wait on each other, while updates to the same symbol are
//! applied one at a time and each sees the state left by the previous one.
//! Once it holds the record lock, a mutation re-checks that the slot is still
//! registered, so nothing lands on a record `unregister` already removed.
//!
//! [`StockRecord`]: stockalerts_core::StockRecord

mod memory;

pub use memory::InMemoryStockStore;
