use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use stockalerts_core::Alert;
use stockalerts_ports::{AlertEmitter, EmitError};
use tokio::sync::broadcast;

/// Broadcast-based alert emitter
///
/// Fans alerts out to any number of in-process subscribers over a tokio
/// broadcast channel. Having no subscribers is not an error; the alert is
/// simply counted as undelivered.
pub struct BroadcastEmitter {
    tx: broadcast::Sender<Alert>,
    /// Alerts sent while nobody was subscribed
    undelivered: Arc<AtomicU64>,
}

impl BroadcastEmitter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            undelivered: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to all alerts emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn undelivered(&self) -> u64 {
        self.undelivered.load(Ordering::SeqCst)
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Clone for BroadcastEmitter {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            undelivered: Arc::clone(&self.undelivered),
        }
    }
}

#[async_trait]
impl AlertEmitter for BroadcastEmitter {
    async fn emit(&self, alert: &Alert) -> Result<(), EmitError> {
        if self.tx.send(alert.clone()).is_err() {
            self.undelivered.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "BroadcastEmitter"
    }
}
