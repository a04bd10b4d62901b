//! Dashboard configuration: parsing, env overrides and validation.
//!
//! Every field is optional in the TOML file and defaults to the stock gold
//! dashboard: three gold instruments, five chart timeframes, synthetic data.
//!
//! Entrypoints:
//! - [`load_config_str`]: parse + override + validate a TOML string
//! - [`load_config`]: same from an optional file path (`None` means defaults)
//!
//! The data source is chosen here and injected into the provider registry;
//! `DASHBOARD_DATA_SOURCE` overrides whatever the file says.

use std::path::Path;

use anyhow::Context;
use chrono_tz::Tz;
use indexmap::IndexMap;
use market_data_ingestor::providers::{
    live_rest::params::LiveParams,
    registry::{DataSource, UnknownDataSource},
    synthetic::SyntheticParams,
};
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_override;
use signal_engine::snapshot::IndicatorParams;
use thiserror::Error;
use tracing::info;

/// Environment variable overriding [`DashboardConfig::data_source`].
pub const DATA_SOURCE_ENV: &str = "DASHBOARD_DATA_SOURCE";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_source: DataSource,
    pub default_asset: String,
    /// Timeframe whose closes feed the indicators and the price KPI.
    pub base_timeframe: String,
    /// Indicator basis when the base timeframe was not loaded.
    pub fallback_timeframe: String,
    /// IANA zone used to print headline timestamps.
    pub display_timezone: Tz,
    pub assets: Vec<AssetCfg>,
    /// Chart tabs, in display order.
    pub timeframes: IndexMap<String, TimeframeCfg>,
    pub synthetic: SyntheticParams,
    pub live: LiveParams,
    pub indicators: IndicatorParams,
}

/// A selectable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssetCfg {
    pub symbol: String,
    pub label: String,
}

/// One chart tab: how many source candles to fetch and how many to merge per bucket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimeframeCfg {
    pub label: String,
    pub points: usize,
    pub interval_minutes: u32,
}

impl TimeframeCfg {
    fn new(label: &str, points: usize, interval_minutes: u32) -> Self {
        Self {
            label: label.to_string(),
            points,
            interval_minutes,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let assets = [
            ("XAUUSD", "Gold (XAUUSD)"),
            ("GLD", "GLD ETF"),
            ("GC=F", "Gold Futures (COMEX)"),
        ]
        .into_iter()
        .map(|(symbol, label)| AssetCfg {
            symbol: symbol.to_string(),
            label: label.to_string(),
        })
        .collect();

        let timeframes = IndexMap::from([
            ("1h".to_string(), TimeframeCfg::new("Hour", 120, 1)),
            ("1d".to_string(), TimeframeCfg::new("Day", 96, 15)),
            ("1w".to_string(), TimeframeCfg::new("Week", 70, 60)),
            ("15d".to_string(), TimeframeCfg::new("Fortnight", 90, 120)),
            ("1m".to_string(), TimeframeCfg::new("Month", 120, 240)),
        ]);

        Self {
            data_source: DataSource::Synthetic,
            default_asset: "XAUUSD".to_string(),
            base_timeframe: "1d".to_string(),
            fallback_timeframe: "1h".to_string(),
            display_timezone: chrono_tz::UTC,
            assets,
            timeframes,
            synthetic: SyntheticParams::default(),
            live: LiveParams::default(),
            indicators: IndicatorParams::default(),
        }
    }
}

/// Validation failures for a parsed configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one timeframe must be configured")]
    NoTimeframes,

    #[error("at least one asset must be configured")]
    NoAssets,

    #[error("timeframe '{key}' must have points > 0 and interval_minutes > 0")]
    EmptyTimeframe { key: String },

    #[error("{field} refers to unknown timeframe '{key}'")]
    UnknownTimeframe { field: &'static str, key: String },

    #[error("duplicate asset symbol '{0}'")]
    DuplicateAsset(String),

    #[error("unknown asset '{symbol}' (configured: {known})")]
    UnknownAsset { symbol: String, known: String },

    #[error("{field} {requirement}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
    },

    #[error(transparent)]
    DataSource(#[from] UnknownDataSource),
}

impl DashboardConfig {
    /// Checks cross-field references and value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeframes.is_empty() {
            return Err(ConfigError::NoTimeframes);
        }
        if self.assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }
        for (key, tf) in &self.timeframes {
            if tf.points == 0 || tf.interval_minutes == 0 {
                return Err(ConfigError::EmptyTimeframe { key: key.clone() });
            }
        }
        for (field, key) in [
            ("base_timeframe", &self.base_timeframe),
            ("fallback_timeframe", &self.fallback_timeframe),
        ] {
            if !self.timeframes.contains_key(key) {
                return Err(ConfigError::UnknownTimeframe {
                    field,
                    key: key.clone(),
                });
            }
        }
        for (i, a) in self.assets.iter().enumerate() {
            if self.assets[..i].iter().any(|b| b.symbol == a.symbol) {
                return Err(ConfigError::DuplicateAsset(a.symbol.clone()));
            }
        }
        self.asset(&self.default_asset)?;
        self.validate_synthetic()?;
        self.validate_indicators()
    }

    fn validate_synthetic(&self) -> Result<(), ConfigError> {
        let s = &self.synthetic;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        let checks = [
            ("synthetic.base_price", positive(s.base_price), "must be finite and > 0"),
            ("synthetic.start_jitter", non_negative(s.start_jitter), "must be finite and >= 0"),
            ("synthetic.max_drift", non_negative(s.max_drift), "must be finite and >= 0"),
            ("synthetic.max_wick", non_negative(s.max_wick), "must be finite and >= 0"),
            ("synthetic.price_floor", positive(s.price_floor), "must be finite and > 0"),
            ("synthetic.spacing_secs", s.spacing_secs > 0, "must be > 0"),
        ];
        match checks.into_iter().find(|(_, ok, _)| !ok) {
            Some((field, _, requirement)) => Err(ConfigError::OutOfRange { field, requirement }),
            None => Ok(()),
        }
    }

    fn validate_indicators(&self) -> Result<(), ConfigError> {
        let i = &self.indicators;
        let periods = [
            ("indicators.ema_fast", i.ema_fast),
            ("indicators.ema_slow", i.ema_slow),
            ("indicators.rsi_period", i.rsi_period),
            ("indicators.macd_fast", i.macd_fast),
            ("indicators.macd_slow", i.macd_slow),
            ("indicators.macd_signal", i.macd_signal),
        ];
        match periods.into_iter().find(|&(_, period)| period == 0) {
            Some((field, _)) => Err(ConfigError::OutOfRange {
                field,
                requirement: "must be > 0",
            }),
            None => Ok(()),
        }
    }

    /// Applies overrides from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(DATA_SOURCE_ENV) {
            let source: DataSource = raw.parse()?;
            if source != self.data_source {
                info!(
                    from = %self.data_source,
                    to = %source,
                    "data source overridden by {DATA_SOURCE_ENV}"
                );
            }
            self.data_source = source;
        }
        Ok(())
    }

    /// Looks up a configured asset by symbol.
    pub fn asset(&self, symbol: &str) -> Result<&AssetCfg, ConfigError> {
        self.assets
            .iter()
            .find(|a| a.symbol == symbol)
            .ok_or_else(|| ConfigError::UnknownAsset {
                symbol: symbol.to_string(),
                known: self
                    .assets
                    .iter()
                    .map(|a| a.symbol.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// `symbol` if given, otherwise the default asset.
    pub fn resolve_asset(&self, symbol: Option<&str>) -> Result<&AssetCfg, ConfigError> {
        self.asset(symbol.unwrap_or(&self.default_asset))
    }
}

fn finish(mut cfg: DashboardConfig) -> anyhow::Result<DashboardConfig> {
    cfg.apply_overrides(get_env_override)
        .context("invalid environment override")?;
    cfg.validate().context("invalid dashboard configuration")?;
    Ok(cfg)
}

/// Parse a TOML string, apply environment overrides and validate.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<DashboardConfig> {
    let cfg: DashboardConfig = toml::from_str(toml_str).context("failed to parse dashboard TOML")?;
    finish(cfg)
}

/// Read the config file at `path`, or start from defaults when there is none.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config file {}", path.display()))?;
            load_config_str(&text)
        }
        None => finish(DashboardConfig::default()),
    }
}
