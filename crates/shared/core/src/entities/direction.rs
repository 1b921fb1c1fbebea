use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::Price;

/// Which side of the threshold counts as a breach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    /// Alert when the price rises to or above the threshold
    #[default]
    Above,
    /// Alert when the price falls to or below the threshold
    Below,
}

impl AlertDirection {
    /// Breach predicate: is `price` on the alerting side of `threshold`?
    ///
    /// The threshold itself counts as breached in both directions.
    pub fn is_breached(&self, price: Price, threshold: Price) -> bool {
        match self {
            AlertDirection::Above => price >= threshold,
            AlertDirection::Below => price <= threshold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
