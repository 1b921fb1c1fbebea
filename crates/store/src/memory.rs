use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use stockalerts_clock::SystemClock;
use stockalerts_core::{
    AlertDirection, Price, PriceApplication, StockId, StockRecord, Symbol, Timestamp,
    is_valid_price, is_valid_threshold, normalize_symbol,
};
use stockalerts_ports::{AlertError, AlertResult, Clock, StockRepository};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type RecordSlot = Arc<Mutex<StockRecord>>;

/// In-memory stock record store
///
/// Thread-safe storage for records using DashMap, with one mutex per record.
/// Cloning the store is cheap and every clone sees the same records.
pub struct InMemoryStockStore {
    /// Records by normalized symbol
    records: Arc<DashMap<Symbol, RecordSlot>>,
    /// Last id handed out
    last_id: Arc<AtomicU64>,
    /// Source of registration timestamps
    clock: Arc<dyn Clock>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::shared())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            last_id: Arc::new(AtomicU64::new(0)),
            clock,
        }
    }

    /// Clone the record slot out of the map so the shard lock is released
    /// before the record lock is taken.
    fn slot(&self, symbol: &str) -> AlertResult<(Symbol, RecordSlot)> {
        let symbol = normalize(symbol)?;
        let slot = self
            .records
            .get(&symbol)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AlertError::NotFound(symbol.clone()))?;
        Ok((symbol, slot))
    }

    /// Whether `slot` is still the record registered under `symbol`.
    ///
    /// Called with the record lock held: a slot cloned just before
    /// `unregister` removed it must not accept further changes.
    fn is_registered(&self, symbol: &str, slot: &RecordSlot) -> bool {
        self.records
            .get(symbol)
            .is_some_and(|entry| Arc::ptr_eq(entry.value(), slot))
    }

    fn next_id(&self) -> StockId {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for InMemoryStockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryStockStore {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            last_id: Arc::clone(&self.last_id),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn normalize(symbol: &str) -> AlertResult<Symbol> {
    normalize_symbol(symbol).ok_or_else(|| AlertError::InvalidSymbol(symbol.to_string()))
}

fn check_threshold(threshold: Price) -> AlertResult<()> {
    if is_valid_threshold(&threshold) {
        Ok(())
    } else {
        Err(AlertError::InvalidThreshold(format!("{threshold} is negative")))
    }
}

#[async_trait]
impl StockRepository for InMemoryStockStore {
    async fn register(
        &self,
        symbol: &str,
        threshold: Price,
        direction: AlertDirection,
    ) -> AlertResult<StockRecord> {
        let symbol = normalize(symbol)?;
        check_threshold(threshold)?;

        match self.records.entry(symbol.clone()) {
            Entry::Occupied(_) => Err(AlertError::DuplicateSymbol(symbol)),
            Entry::Vacant(vacant) => {
                let record = StockRecord::new(
                    self.next_id(),
                    symbol,
                    threshold,
                    direction,
                    self.clock.now(),
                );
                vacant.insert(Arc::new(Mutex::new(record.clone())));
                log::debug!(
                    "Registered {} (id={}) alert {} {}",
                    record.symbol(),
                    record.id(),
                    direction,
                    threshold
                );
                Ok(record)
            }
        }
    }

    async fn unregister(&self, symbol: &str) -> AlertResult<StockRecord> {
        let symbol = normalize(symbol)?;
        let (_, slot) = self
            .records
            .remove(&symbol)
            .ok_or_else(|| AlertError::NotFound(symbol.clone()))?;
        let record = slot.lock().clone();
        log::debug!("Unregistered {} (id={})", record.symbol(), record.id());
        Ok(record)
    }

    async fn update_threshold(&self, symbol: &str, threshold: Price) -> AlertResult<StockRecord> {
        check_threshold(threshold)?;
        let (symbol, slot) = self.slot(symbol)?;
        let mut record = slot.lock();
        if !self.is_registered(&symbol, &slot) {
            return Err(AlertError::NotFound(symbol));
        }
        record.set_threshold(threshold);
        Ok(record.clone())
    }

    async fn update_direction(
        &self,
        symbol: &str,
        direction: AlertDirection,
    ) -> AlertResult<StockRecord> {
        let (symbol, slot) = self.slot(symbol)?;
        let mut record = slot.lock();
        if !self.is_registered(&symbol, &slot) {
            return Err(AlertError::NotFound(symbol));
        }
        record.set_direction(direction);
        Ok(record.clone())
    }

    async fn get(&self, symbol: &str) -> AlertResult<StockRecord> {
        let (_, slot) = self.slot(symbol)?;
        let record = slot.lock().clone();
        Ok(record)
    }

    async fn list(&self) -> Vec<StockRecord> {
        let slots: Vec<RecordSlot> = self
            .records
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        let mut records: Vec<StockRecord> =
            slots.iter().map(|slot| slot.lock().clone()).collect();
        records.sort_by_key(|r| r.id());
        records
    }

    async fn apply_price(
        &self,
        symbol: &str,
        price: Price,
        at: Timestamp,
    ) -> AlertResult<PriceApplication> {
        if !is_valid_price(&price) {
            return Err(AlertError::InvalidPrice(format!("{price} is negative")));
        }
        let (symbol, slot) = self.slot(symbol)?;

        let mut record = slot.lock();
        if !self.is_registered(&symbol, &slot) {
            return Err(AlertError::NotFound(symbol));
        }
        let previous = record.clone();
        let transition = record.observe(price, at);
        let current = record.clone();
        drop(record);

        log::debug!("{symbol} @ {price}: {transition:?}");
        Ok(PriceApplication { previous, current })
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
