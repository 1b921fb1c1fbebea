use serde::{Deserialize, Serialize};

use crate::values::{Price, Symbol, Timestamp};

/// A single observation from a price feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub symbol: Symbol,
    pub price: Price,
    /// When the price was observed at the source
    pub timestamp: Timestamp,
}

impl PriceUpdate {
    pub fn new(symbol: impl Into<Symbol>, price: Price, timestamp: Timestamp) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            timestamp,
        }
    }
}
