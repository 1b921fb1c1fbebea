use serde::{Deserialize, Serialize};
use std::fmt;

use super::AlertDirection;
use crate::values::{Price, Symbol, Timestamp};

/// Kind of alert handed to an emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// The threshold was crossed onto the alerting side
    Breach,
    /// The price went back to the non-alerting side
    Cleared,
}

/// A triggered alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub symbol: Symbol,
    /// Price that caused the transition
    pub price: Price,
    /// Threshold in force when the price was applied
    pub threshold: Price,
    pub direction: AlertDirection,
    pub kind: AlertKind,
    pub observed_at: Timestamp,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            AlertKind::Breach => "breached",
            AlertKind::Cleared => "cleared",
        };
        write!(
            f,
            "{} {} {} threshold {} at {}",
            self.symbol, verb, self.direction, self.threshold, self.price
        )
    }
}
