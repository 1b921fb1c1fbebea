//! Edge-triggered threshold evaluation
//!
//! The store decides the transition while holding the record lock, so exactly
//! one of any set of racing updates observes a given false→true edge. The
//! evaluator then emits outside the lock: a slow emitter delays only the
//! caller that triggered the alert, never later updates to the same symbol.

use std::sync::Arc;

use stockalerts_core::{
    Alert, AlertDirection, AlertKind, Price, PriceUpdate, StockRecord, Transition,
};
use stockalerts_ports::{AlertEmitter, AlertError, AlertResult, EmitError, StockRepository};

use crate::EvaluatorConfig;

/// Converts price updates into breach/clear transitions and notifies an emitter
pub struct Evaluator {
    store: Arc<dyn StockRepository>,
    emitter: Arc<dyn AlertEmitter>,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(
        store: Arc<dyn StockRepository>,
        emitter: Arc<dyn AlertEmitter>,
        config: EvaluatorConfig,
    ) -> Self {
        Self {
            store,
            emitter,
            config,
        }
    }

    /// Track a symbol using the configured default direction
    pub async fn register(&self, symbol: &str, threshold: Price) -> AlertResult<StockRecord> {
        self.register_with_direction(symbol, threshold, self.config.default_direction)
            .await
    }

    pub async fn register_with_direction(
        &self,
        symbol: &str,
        threshold: Price,
        direction: AlertDirection,
    ) -> AlertResult<StockRecord> {
        let record = self.store.register(symbol, threshold, direction).await?;
        log::info!(
            "Tracking {} (id={}): alert {} {}",
            record.symbol(),
            record.id(),
            direction,
            threshold
        );
        Ok(record)
    }

    pub async fn unregister(&self, symbol: &str) -> AlertResult<StockRecord> {
        let record = self.store.unregister(symbol).await?;
        log::info!("Stopped tracking {}", record.symbol());
        Ok(record)
    }

    pub async fn update_threshold(
        &self,
        symbol: &str,
        threshold: Price,
    ) -> AlertResult<StockRecord> {
        let record = self.store.update_threshold(symbol, threshold).await?;
        log::info!("{} threshold now {}", record.symbol(), threshold);
        Ok(record)
    }

    pub async fn update_direction(
        &self,
        symbol: &str,
        direction: AlertDirection,
    ) -> AlertResult<StockRecord> {
        let record = self.store.update_direction(symbol, direction).await?;
        log::info!("{} now alerts {}", record.symbol(), direction);
        Ok(record)
    }

    pub async fn get(&self, symbol: &str) -> AlertResult<StockRecord> {
        self.store.get(symbol).await
    }

    pub async fn list(&self) -> Vec<StockRecord> {
        self.store.list().await
    }

    /// Apply one price update and notify on a breach edge
    ///
    /// The new price and alert state are committed before the emitter is
    /// called. If emission fails or times out the caller gets `EmitFailed`
    /// carrying the committed transition; the state stays as committed.
    pub async fn on_price_update(&self, update: &PriceUpdate) -> AlertResult<Transition> {
        let application = self
            .store
            .apply_price(&update.symbol, update.price, update.timestamp)
            .await?;
        let transition = application.transition();

        let Some(alert) = application.alert() else {
            return Ok(transition);
        };

        match alert.kind {
            AlertKind::Breach => log::info!("{alert}"),
            AlertKind::Cleared => {
                log::info!("{alert}");
                if !self.config.notify_on_clear {
                    return Ok(transition);
                }
            }
        }

        self.emit(&alert).await.map_err(|e| {
            log::error!("{} emitter failed for {}: {e}", self.emitter.name(), alert.symbol);
            AlertError::EmitFailed {
                symbol: alert.symbol.clone(),
                transition,
                reason: e.to_string(),
            }
        })?;

        Ok(transition)
    }

    async fn emit(&self, alert: &Alert) -> Result<(), EmitError> {
        let timeout = self.config.emit_timeout;
        match tokio::time::timeout(timeout, self.emitter.emit(alert)).await {
            Ok(result) => result,
            Err(_) => Err(EmitError::Timeout(timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use stockalerts_core::Timestamp;
    use stockalerts_store::InMemoryStockStore;

    fn ts(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[derive(Default)]
    struct RecordingEmitter {
        alerts: Mutex<Vec<Alert>>,
    }

    #[async_trait]
    impl AlertEmitter for RecordingEmitter {
        async fn emit(&self, alert: &Alert) -> Result<(), EmitError> {
            self.alerts.lock().push(alert.clone());
            Ok(())
        }
    }

    struct FailingEmitter;

    #[async_trait]
    impl AlertEmitter for FailingEmitter {
        async fn emit(&self, _alert: &Alert) -> Result<(), EmitError> {
            Err(EmitError::Rejected("mailbox full".to_string()))
        }
    }

    struct HangingEmitter;

    #[async_trait]
    impl AlertEmitter for HangingEmitter {
        async fn emit(&self, _alert: &Alert) -> Result<(), EmitError> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    fn evaluator(emitter: Arc<dyn AlertEmitter>, config: EvaluatorConfig) -> Evaluator {
        Evaluator::new(Arc::new(InMemoryStockStore::new()), emitter, config)
    }

    #[tokio::test]
    async fn test_breach_emits_once() {
        let emitter = Arc::new(RecordingEmitter::default());
        let ev = evaluator(emitter.clone(), EvaluatorConfig::default());
        ev.register("AAPL", dec!(150)).await.unwrap();

        let t1 = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(151), ts(1)))
            .await
            .unwrap();
        let t2 = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(152), ts(2)))
            .await
            .unwrap();

        assert_eq!(t1, Transition::BreachOccurred);
        assert_eq!(t2, Transition::NoChange);

        let alerts = emitter.alerts.lock();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].symbol, "AAPL");
        assert_eq!(alerts[0].price, dec!(151));
        assert_eq!(alerts[0].threshold, dec!(150));
        assert_eq!(alerts[0].kind, AlertKind::Breach);
    }

    #[tokio::test]
    async fn test_clear_is_silent_by_default() {
        let emitter = Arc::new(RecordingEmitter::default());
        let ev = evaluator(emitter.clone(), EvaluatorConfig::default());
        ev.register("AAPL", dec!(150)).await.unwrap();

        ev.on_price_update(&PriceUpdate::new("AAPL", dec!(160), ts(1)))
            .await
            .unwrap();
        let cleared = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(140), ts(2)))
            .await
            .unwrap();

        assert_eq!(cleared, Transition::Cleared);
        assert_eq!(emitter.alerts.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_notifies_when_enabled() {
        let emitter = Arc::new(RecordingEmitter::default());
        let config = EvaluatorConfig {
            notify_on_clear: true,
            ..Default::default()
        };
        let ev = evaluator(emitter.clone(), config);
        ev.register("AAPL", dec!(150)).await.unwrap();

        ev.on_price_update(&PriceUpdate::new("AAPL", dec!(160), ts(1)))
            .await
            .unwrap();
        ev.on_price_update(&PriceUpdate::new("AAPL", dec!(140), ts(2)))
            .await
            .unwrap();

        let kinds: Vec<_> = emitter.alerts.lock().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::Breach, AlertKind::Cleared]);
    }

    #[tokio::test]
    async fn test_default_direction_from_config() {
        let emitter = Arc::new(RecordingEmitter::default());
        let config = EvaluatorConfig {
            default_direction: AlertDirection::Below,
            ..Default::default()
        };
        let ev = evaluator(emitter.clone(), config);
        let record = ev.register("AAPL", dec!(150)).await.unwrap();
        assert_eq!(record.direction(), AlertDirection::Below);

        let t = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(149), ts(1)))
            .await
            .unwrap();
        assert_eq!(t, Transition::BreachOccurred);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_not_found() {
        let emitter = Arc::new(RecordingEmitter::default());
        let ev = evaluator(emitter.clone(), EvaluatorConfig::default());

        let err = ev
            .on_price_update(&PriceUpdate::new("NOPE", dec!(1), ts(1)))
            .await
            .unwrap_err();
        assert_eq!(err, AlertError::NotFound("NOPE".to_string()));
        assert!(ev.list().await.is_empty());
        assert!(emitter.alerts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_emit_failure_keeps_committed_state() {
        let ev = evaluator(Arc::new(FailingEmitter), EvaluatorConfig::default());
        ev.register("AAPL", dec!(150)).await.unwrap();

        let err = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(155), ts(1)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AlertError::EmitFailed { ref symbol, transition: Transition::BreachOccurred, .. }
                if symbol == "AAPL"
        ));

        let record = ev.get("AAPL").await.unwrap();
        assert!(record.alert_active());
        assert_eq!(record.current_price(), Some(dec!(155)));

        // Same episode: no second attempt
        let t = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(156), ts(2)))
            .await
            .unwrap();
        assert_eq!(t, Transition::NoChange);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_emitter_times_out() {
        let config = EvaluatorConfig {
            emit_timeout: Duration::from_millis(500),
            ..Default::default()
        };
        let ev = evaluator(Arc::new(HangingEmitter), config);
        ev.register("AAPL", dec!(150)).await.unwrap();

        let err = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(150), ts(1)))
            .await
            .unwrap_err();
        match err {
            AlertError::EmitFailed { reason, .. } => {
                assert_eq!(reason, EmitError::Timeout(Duration::from_millis(500)).to_string())
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The record lock was released before emitting
        let t = ev
            .on_price_update(&PriceUpdate::new("AAPL", dec!(10), ts(2)))
            .await
            .unwrap();
        assert_eq!(t, Transition::Cleared);
    }

    #[tokio::test]
    async fn test_facade_operations() {
        let emitter = Arc::new(RecordingEmitter::default());
        let ev = evaluator(emitter, EvaluatorConfig::default());

        ev.register_with_direction("msft", dec!(300), AlertDirection::Below)
            .await
            .unwrap();
        ev.update_threshold("MSFT", dec!(310)).await.unwrap();
        ev.update_direction("MSFT", AlertDirection::Above).await.unwrap();

        let record = ev.get("MSFT").await.unwrap();
        assert_eq!(record.alert_threshold(), dec!(310));
        assert_eq!(record.direction(), AlertDirection::Above);

        ev.unregister("MSFT").await.unwrap();
        assert!(matches!(ev.get("MSFT").await, Err(AlertError::NotFound(_))));
        assert!(matches!(
            ev.register("MSFT", dec!(-5)).await,
            Err(AlertError::InvalidThreshold(_))
        ));
    }
}
