//! Price feed line parsing
//!
//! One JSON object per line:
//!
//! ```text
//! {"symbol":"AAPL","price":151.2,"timestamp":"2024-01-02T15:04:05Z"}
//! {"symbol":"MSFT","price":"402.10"}
//! ```
//!
//! `timestamp` is optional; missing timestamps are stamped with the runner's
//! clock. Blank lines and `#` comments are skipped.

use serde::Deserialize;
use stockalerts_core::{Price, PriceUpdate, Timestamp};
use stockalerts_ports::Clock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Malformed feed line: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct FeedLine {
    symbol: String,
    price: Price,
    #[serde(default)]
    timestamp: Option<Timestamp>,
}

/// Parse one feed line
///
/// Returns `Ok(None)` for lines that carry no update.
pub fn parse_line(line: &str, clock: &dyn Clock) -> Result<Option<PriceUpdate>, FeedError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parsed: FeedLine = serde_json::from_str(trimmed)?;
    let timestamp = parsed.timestamp.unwrap_or_else(|| clock.now());
    Ok(Some(PriceUpdate::new(parsed.symbol, parsed.price, timestamp)))
}
