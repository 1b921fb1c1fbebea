use std::time::Duration;
use stockalerts_core::Transition;
use thiserror::Error;

/// Errors reported by store and evaluator operations
///
/// All of these are local and recoverable; none should take the process down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    #[error("Symbol already tracked: {0}")]
    DuplicateSymbol(String),

    #[error("Symbol not tracked: {0}")]
    NotFound(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// The state change was committed but the alert could not be delivered
    #[error("Alert for {symbol} could not be emitted: {reason}")]
    EmitFailed {
        symbol: String,
        /// The transition that was committed before emitting
        transition: Transition,
        reason: String,
    },
}

pub type AlertResult<T> = std::result::Result<T, AlertError>;

/// Failures reported by an alert emitter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("Emitter timed out after {0:?}")]
    Timeout(Duration),

    #[error("Emitter channel closed")]
    Closed,

    #[error("Emitter I/O failure: {0}")]
    Io(String),

    #[error("Alert rejected: {0}")]
    Rejected(String),
}
