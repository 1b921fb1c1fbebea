use serde::Serialize;

use super::{Alert, AlertDirection, AlertKind, Transition};
use crate::values::{Price, StockId, Symbol, Timestamp};

/// A tracked stock and its alert state
///
/// Fields are private: the alert state may only move through [`observe`],
/// so a record can never claim a breach that its last price does not support.
///
/// [`observe`]: StockRecord::observe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRecord {
    id: StockId,
    symbol: Symbol,
    /// Absent until the first price update arrives
    current_price: Option<Price>,
    alert_threshold: Price,
    direction: AlertDirection,
    /// Whether the last applied price is on the alerting side
    alert_active: bool,
    created_at: Timestamp,
    last_updated: Option<Timestamp>,
    /// Number of breach episodes seen so far
    breach_count: u64,
}

impl StockRecord {
    /// Create a freshly registered record (no price yet, alert disarmed)
    pub fn new(
        id: StockId,
        symbol: impl Into<Symbol>,
        alert_threshold: Price,
        direction: AlertDirection,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            current_price: None,
            alert_threshold,
            direction,
            alert_active: false,
            created_at,
            last_updated: None,
            breach_count: 0,
        }
    }

    pub fn id(&self) -> StockId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn current_price(&self) -> Option<Price> {
        self.current_price
    }

    pub fn alert_threshold(&self) -> Price {
        self.alert_threshold
    }

    pub fn direction(&self) -> AlertDirection {
        self.direction
    }

    pub fn alert_active(&self) -> bool {
        self.alert_active
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated
    }

    pub fn breach_count(&self) -> u64 {
        self.breach_count
    }

    /// Would `price` breach this record's threshold?
    pub fn is_breached_by(&self, price: Price) -> bool {
        self.direction.is_breached(price, self.alert_threshold)
    }

    /// Apply an observed price and return the resulting alert transition
    pub fn observe(&mut self, price: Price, at: Timestamp) -> Transition {
        let was_active = self.alert_active;
        let is_active = self.is_breached_by(price);

        self.current_price = Some(price);
        self.last_updated = Some(at);
        self.alert_active = is_active;

        let transition = Transition::between(was_active, is_active);
        if transition == Transition::BreachOccurred {
            self.breach_count += 1;
        }
        transition
    }

    /// Change the threshold. The alert state is re-evaluated on the next price.
    pub fn set_threshold(&mut self, threshold: Price) {
        self.alert_threshold = threshold;
    }

    /// Change the breach direction. The alert state is re-evaluated on the next price.
    pub fn set_direction(&mut self, direction: AlertDirection) {
        self.direction = direction;
    }
}

/// Record state on both sides of a price application
#[derive(Debug, Clone, PartialEq)]
pub struct PriceApplication {
    pub previous: StockRecord,
    pub current: StockRecord,
}

impl PriceApplication {
    pub fn transition(&self) -> Transition {
        Transition::between(self.previous.alert_active(), self.current.alert_active())
    }

    /// Build the alert for this application's transition, if it has one
    pub fn alert(&self) -> Option<Alert> {
        let transition = self.transition();
        if !transition.is_edge() {
            return None;
        }
        let kind = if transition == Transition::BreachOccurred {
            AlertKind::Breach
        } else {
            AlertKind::Cleared
        };

        Some(Alert {
            symbol: self.current.symbol.clone(),
            price: self.current.current_price?,
            threshold: self.current.alert_threshold,
            direction: self.current.direction,
            kind,
            observed_at: self.current.last_updated?,
        })
    }
}
