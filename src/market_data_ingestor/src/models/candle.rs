//! Canonical in-memory representation of an OHLC candle.
//!
//! This struct is the output of every [`DataProvider`](crate::providers::DataProvider)
//! implementation and the input of [`aggregate`](crate::aggregate::aggregate).

use serde::{Deserialize, Serialize};

/// A single OHLC bar.
///
/// Within one series candles are ordered by strictly increasing `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start, Unix epoch seconds (UTC).
    pub time: i64,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,
}

impl Candle {
    /// `low <= min(open, close)` and `high >= max(open, close)`.
    pub fn is_well_formed(&self) -> bool {
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }
}

/// Closing prices of a series, in order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
