use serde::{Deserialize, Serialize};

/// Outcome of applying one price to a record's alert state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Not breached before, breached now
    BreachOccurred,
    /// Breached before, not breached now
    Cleared,
    /// Alert state unchanged
    NoChange,
}

impl Transition {
    /// Classify the edge between two alert states
    pub fn between(was_active: bool, is_active: bool) -> Self {
        match (was_active, is_active) {
            (false, true) => Transition::BreachOccurred,
            (true, false) => Transition::Cleared,
            _ => Transition::NoChange,
        }
    }

    /// Returns true if the alert state flipped
    pub fn is_edge(&self) -> bool {
        !matches!(self, Transition::NoChange)
    }
}
