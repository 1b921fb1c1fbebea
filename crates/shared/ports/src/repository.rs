use async_trait::async_trait;
use stockalerts_core::{AlertDirection, Price, PriceApplication, StockRecord, Timestamp};

use crate::AlertResult;

/// Repository for tracked stock records
///
/// This port is the contract any backing store must satisfy. Symbols passed in
/// are normalized by the implementation (trimmed, uppercased), and every
/// returned record is a snapshot; callers never hold a live reference.
///
/// Implementations must serialize `apply_price` per symbol so that two
/// concurrent updates cannot both observe the alert as disarmed.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Start tracking a symbol with no price and the alert disarmed
    async fn register(
        &self,
        symbol: &str,
        threshold: Price,
        direction: AlertDirection,
    ) -> AlertResult<StockRecord>;

    /// Stop tracking a symbol, returning its last state
    async fn unregister(&self, symbol: &str) -> AlertResult<StockRecord>;

    /// Replace the threshold; the alert state is left as is
    async fn update_threshold(&self, symbol: &str, threshold: Price) -> AlertResult<StockRecord>;

    /// Replace the breach direction; the alert state is left as is
    async fn update_direction(
        &self,
        symbol: &str,
        direction: AlertDirection,
    ) -> AlertResult<StockRecord>;

    /// Get a snapshot of one record
    async fn get(&self, symbol: &str) -> AlertResult<StockRecord>;

    /// Get snapshots of all records, ordered by id
    async fn list(&self) -> Vec<StockRecord>;

    /// Apply an observed price and return the state before and after
    async fn apply_price(
        &self,
        symbol: &str,
        price: Price,
        at: Timestamp,
    ) -> AlertResult<PriceApplication>;

    /// Number of tracked symbols
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
