use async_trait::async_trait;
use stockalerts_core::Alert;

use crate::EmitError;

/// Sink for triggered alerts
///
/// Called by the evaluator after the record's new state has been committed.
/// Delivery (message, webhook, log) and any retry policy belong to the
/// implementation; the evaluator only bounds how long it waits.
#[async_trait]
pub trait AlertEmitter: Send + Sync {
    /// Deliver one alert
    async fn emit(&self, alert: &Alert) -> Result<(), EmitError>;

    /// Get the emitter's name for logging
    fn name(&self) -> &str {
        "AlertEmitter"
    }
}
