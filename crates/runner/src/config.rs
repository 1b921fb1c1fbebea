//! Configuration loading for the feed runner
//!
//! Supports JSON configuration files for:
//! - Evaluator policy (default direction, clear notifications, emit timeout)
//! - The emitter alerts are delivered to
//! - A watchlist of symbols registered at startup

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use stockalerts_core::{AlertDirection, Price, is_valid_threshold, normalize_symbol};
use stockalerts_evaluator::EvaluatorConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid watchlist entry {symbol:?}: {reason}")]
    InvalidEntry { symbol: String, reason: String },
    #[error("Symbol listed twice in watchlist: {0}")]
    DuplicateEntry(String),
    #[error("emit_timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Where alerts are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitterKind {
    /// Through the application log
    #[default]
    Log,
    /// As JSON lines on stdout
    Stdout,
}

/// A symbol to register at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchEntry {
    pub symbol: String,
    pub threshold: Price,
    /// Falls back to `AlertsConfig::default_direction`
    #[serde(default)]
    pub direction: Option<AlertDirection>,
}

impl WatchEntry {
    pub fn new(symbol: impl Into<String>, threshold: Price) -> Self {
        Self {
            symbol: symbol.into(),
            threshold,
            direction: None,
        }
    }

    pub fn with_direction(mut self, direction: AlertDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Root configuration for the runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub default_direction: AlertDirection,

    #[serde(default)]
    pub notify_on_clear: bool,

    #[serde(default = "default_emit_timeout_ms")]
    pub emit_timeout_ms: u64,

    #[serde(default)]
    pub emitter: EmitterKind,

    #[serde(default)]
    pub watchlist: Vec<WatchEntry>,
}

fn default_name() -> String {
    "Stock Alerts".to_string()
}

fn default_emit_timeout_ms() -> u64 {
    2000
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            default_direction: AlertDirection::default(),
            notify_on_clear: false,
            emit_timeout_ms: default_emit_timeout_ms(),
            emitter: EmitterKind::default(),
            watchlist: Vec::new(),
        }
    }
}

impl AlertsConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.emit_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let mut seen = HashSet::new();
        for entry in &self.watchlist {
            let symbol =
                normalize_symbol(&entry.symbol).ok_or_else(|| ConfigError::InvalidEntry {
                    symbol: entry.symbol.clone(),
                    reason: "empty symbol".to_string(),
                })?;
            if !is_valid_threshold(&entry.threshold) {
                return Err(ConfigError::InvalidEntry {
                    symbol: entry.symbol.clone(),
                    reason: format!("negative threshold {}", entry.threshold),
                });
            }
            if !seen.insert(symbol.clone()) {
                return Err(ConfigError::DuplicateEntry(symbol));
            }
        }
        Ok(())
    }

    pub fn emit_timeout(&self) -> Duration {
        Duration::from_millis(self.emit_timeout_ms)
    }

    /// Evaluator policy derived from this configuration
    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            default_direction: self.default_direction,
            notify_on_clear: self.notify_on_clear,
            emit_timeout: self.emit_timeout(),
        }
    }

    /// Direction a watchlist entry registers with
    pub fn direction_for(&self, entry: &WatchEntry) -> AlertDirection {
        entry.direction.unwrap_or(self.default_direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = AlertsConfig::from_json("{}").unwrap();
        assert_eq!(config, AlertsConfig::default());
        assert_eq!(config.emit_timeout(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "name": "Desk alerts",
            "default_direction": "below",
            "notify_on_clear": true,
            "emit_timeout_ms": 250,
            "emitter": "stdout",
            "watchlist": [
                { "symbol": "aapl", "threshold": 150.5 },
                { "symbol": "MSFT", "threshold": "410", "direction": "above" }
            ]
        }"#;
        let config = AlertsConfig::from_json(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.name, "Desk alerts");
        assert_eq!(config.emitter, EmitterKind::Stdout);
        assert_eq!(config.watchlist[0].threshold, dec!(150.5));
        assert_eq!(config.direction_for(&config.watchlist[0]), AlertDirection::Below);
        assert_eq!(config.direction_for(&config.watchlist[1]), AlertDirection::Above);

        let ev = config.evaluator_config();
        assert!(ev.notify_on_clear);
        assert_eq!(ev.emit_timeout, Duration::from_millis(250));
        assert_eq!(ev.default_direction, AlertDirection::Below);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AlertsConfig {
            watchlist: vec![WatchEntry::new("AAPL", dec!(-1))],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEntry { .. })
        ));

        config.watchlist = vec![WatchEntry::new("AAPL", dec!(1)), WatchEntry::new(" aapl", dec!(2))];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateEntry(s)) if s == "AAPL"
        ));

        config.watchlist = vec![WatchEntry::new("  ", dec!(1))];
        assert!(config.validate().is_err());

        config.watchlist.clear();
        config.emit_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = AlertsConfig::from_json(include_str!("../config/alerts.example.json")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.watchlist.len(), 3);
        assert_eq!(config.direction_for(&config.watchlist[2]), AlertDirection::Below);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            AlertsConfig::from_json(r#"{"emitter": "pager"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AlertsConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
