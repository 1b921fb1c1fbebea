use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Ticker symbol of a tracked stock (normalized, see [`normalize_symbol`])
pub type Symbol = String;

/// Store-assigned identifier of a stock record
pub type StockId = u64;

/// Normalize a raw ticker: trim surrounding whitespace and uppercase.
///
/// Returns `None` when nothing is left after trimming.
pub fn normalize_symbol(raw: &str) -> Option<Symbol> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_uppercase())
    }
}

/// Thresholds must be non-negative
pub fn is_valid_threshold(threshold: &Price) -> bool {
    !threshold.is_sign_negative() || threshold.is_zero()
}

/// Observed prices must be non-negative
pub fn is_valid_price(price: &Price) -> bool {
    !price.is_sign_negative() || price.is_zero()
}
