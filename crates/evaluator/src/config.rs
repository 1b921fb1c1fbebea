//! Evaluator policy

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stockalerts_core::AlertDirection;

/// Policy knobs for the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Direction used by `Evaluator::register` when none is given
    pub default_direction: AlertDirection,
    /// Also emit an alert when a breach clears
    pub notify_on_clear: bool,
    /// Upper bound on a single emitter call
    pub emit_timeout: Duration,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            default_direction: AlertDirection::Above,
            notify_on_clear: false,
            emit_timeout: Duration::from_secs(2),
        }
    }
}
