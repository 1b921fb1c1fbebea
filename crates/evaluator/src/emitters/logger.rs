use async_trait::async_trait;
use stockalerts_core::{Alert, AlertKind};
use stockalerts_ports::{AlertEmitter, EmitError};

/// Emitter that writes alerts to the application log
///
/// Breaches go out at `warn`, clears at `info`, under the `stockalerts::alert`
/// target so they can be filtered separately with `RUST_LOG`.
#[derive(Debug, Clone, Default)]
pub struct LogEmitter;

impl LogEmitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertEmitter for LogEmitter {
    async fn emit(&self, alert: &Alert) -> Result<(), EmitError> {
        match alert.kind {
            AlertKind::Breach => log::warn!(target: "stockalerts::alert", "ALERT {alert}"),
            AlertKind::Cleared => log::info!(target: "stockalerts::alert", "CLEAR {alert}"),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "LogEmitter"
    }
}
