//! Feed Processor - drives price updates through the evaluator
//!
//! Updates are applied in the order they are read, so per-symbol ordering in
//! the feed is preserved. Nothing a single line does can stop the feed:
//! - unknown symbols are logged and dropped (the feed may quote symbols that
//!   were never registered)
//! - emitter failures are logged and counted; the state change stands
//! - malformed lines are logged and skipped

use serde::Serialize;
use std::sync::Arc;
use stockalerts_core::{PriceUpdate, Transition};
use stockalerts_evaluator::Evaluator;
use stockalerts_ports::{AlertError, Clock};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::feed::parse_line;

/// Running totals for one feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    /// Updates applied to a tracked symbol
    pub processed: u64,
    pub breaches: u64,
    pub clears: u64,
    /// Updates for symbols that are not tracked
    pub dropped: u64,
    /// Updates refused by validation (bad price or symbol)
    pub rejected: u64,
    /// Lines that could not be parsed
    pub malformed: u64,
    /// Alerts committed but not delivered
    pub emit_failures: u64,
}

pub struct FeedProcessor {
    evaluator: Arc<Evaluator>,
    clock: Arc<dyn Clock>,
    stats: FeedStats,
}

impl FeedProcessor {
    pub fn new(evaluator: Arc<Evaluator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            evaluator,
            clock,
            stats: FeedStats::default(),
        }
    }

    pub fn stats(&self) -> &FeedStats {
        &self.stats
    }

    /// Apply one update, recording the outcome
    pub async fn process_update(&mut self, update: &PriceUpdate) -> Option<Transition> {
        match self.evaluator.on_price_update(update).await {
            Ok(transition) => {
                self.record_applied(transition);
                Some(transition)
            }
            Err(AlertError::NotFound(symbol)) => {
                log::warn!("Dropping update for untracked symbol {symbol}");
                self.stats.dropped += 1;
                None
            }
            Err(AlertError::EmitFailed { transition, .. }) => {
                // The evaluator already logged the delivery failure
                self.record_applied(transition);
                self.stats.emit_failures += 1;
                Some(transition)
            }
            Err(e) => {
                log::warn!("Rejected update {} @ {}: {e}", update.symbol, update.price);
                self.stats.rejected += 1;
                None
            }
        }
    }

    fn record_applied(&mut self, transition: Transition) {
        self.stats.processed += 1;
        match transition {
            Transition::BreachOccurred => self.stats.breaches += 1,
            Transition::Cleared => self.stats.clears += 1,
            Transition::NoChange => {}
        }
    }

    /// Parse and apply one feed line
    pub async fn process_line(&mut self, line: &str) -> Option<Transition> {
        match parse_line(line, self.clock.as_ref()) {
            Ok(Some(update)) => self.process_update(&update).await,
            Ok(None) => None,
            Err(e) => {
                log::warn!("{e}");
                self.stats.malformed += 1;
                None
            }
        }
    }

    /// Consume a whole feed, returning the final totals
    pub async fn run<R>(&mut self, reader: R) -> std::io::Result<FeedStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            self.process_line(&line).await;
        }
        Ok(self.stats.clone())
    }
}
