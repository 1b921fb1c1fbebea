//! Startup wiring: store, emitter, evaluator, watchlist

use std::sync::Arc;
use stockalerts_evaluator::{Evaluator, LogEmitter};
use stockalerts_ports::{AlertEmitter, AlertResult, Clock};
use stockalerts_store::InMemoryStockStore;

use crate::config::{AlertsConfig, EmitterKind};
use crate::emitter::JsonLinesEmitter;

/// Build the emitter selected in the configuration
pub fn build_emitter(kind: EmitterKind) -> Arc<dyn AlertEmitter> {
    match kind {
        EmitterKind::Log => Arc::new(LogEmitter::new()),
        EmitterKind::Stdout => Arc::new(JsonLinesEmitter::stdout()),
    }
}

/// Build an evaluator over a fresh in-memory store
pub fn build_evaluator(
    config: &AlertsConfig,
    clock: Arc<dyn Clock>,
    emitter: Arc<dyn AlertEmitter>,
) -> Evaluator {
    let store = InMemoryStockStore::with_clock(clock);
    Evaluator::new(Arc::new(store), emitter, config.evaluator_config())
}

/// Register every watchlist entry, returning how many were registered
///
/// Stops at the first failure; a validated config cannot fail here on a fresh
/// store.
pub async fn register_watchlist(
    evaluator: &Evaluator,
    config: &AlertsConfig,
) -> AlertResult<usize> {
    for entry in &config.watchlist {
        evaluator
            .register_with_direction(
                &entry.symbol,
                entry.threshold,
                config.direction_for(entry),
            )
            .await?;
    }
    Ok(config.watchlist.len())
}
