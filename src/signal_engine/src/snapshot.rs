//! Latest indicator values for a single timeframe.

use serde::{Deserialize, Serialize};

use crate::indicators::{ema, macd, rsi};

/// Periods used to build an [`IndicatorSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorParams {
    /// Short EMA period (EMA20 on the dashboard).
    pub ema_fast: usize,
    /// Long EMA period (EMA50 on the dashboard).
    pub ema_slow: usize,
    /// RSI smoothing period.
    pub rsi_period: usize,
    /// MACD fast EMA period.
    pub macd_fast: usize,
    /// MACD slow EMA period.
    pub macd_slow: usize,
    /// MACD signal EMA period.
    pub macd_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ema_fast: 20,
            ema_slow: 50,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// Last computed value of each indicator. All `None` for an empty series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct IndicatorSnapshot {
    /// Latest close.
    pub price: Option<f64>,
    /// Latest short EMA.
    pub ema20: Option<f64>,
    /// Latest long EMA.
    pub ema50: Option<f64>,
    /// Latest RSI.
    pub rsi14: Option<f64>,
    /// Latest MACD line value.
    pub macd: Option<f64>,
    /// Latest MACD signal value.
    pub macd_signal: Option<f64>,
    /// Latest MACD histogram value.
    pub macd_hist: Option<f64>,
}

impl IndicatorSnapshot {
    /// Computes every series over `closes` and keeps the last element of each.
    pub fn from_closes(closes: &[f64], params: &IndicatorParams) -> Self {
        let m = macd(closes, params.macd_fast, params.macd_slow, params.macd_signal);
        Self {
            price: closes.last().copied(),
            ema20: ema(closes, params.ema_fast).last().copied(),
            ema50: ema(closes, params.ema_slow).last().copied(),
            rsi14: rsi(closes, params.rsi_period).last().copied(),
            macd: m.line.last().copied(),
            macd_signal: m.signal.last().copied(),
            macd_hist: m.hist.last().copied(),
        }
    }
}
