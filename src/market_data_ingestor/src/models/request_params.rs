use serde::{Deserialize, Serialize};

/// Parameters for one candle request, vendor-agnostic.
///
/// `points` is the number of candles wanted and `interval_minutes` the width
/// of each. Providers are free to ignore the interval (the synthetic
/// generator always produces one-minute candles).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlesRequest {
    /// Symbol to request (e.g. `"XAUUSD"`, `"GC=F"`).
    pub symbol: String,

    /// Number of candles, ending at "now".
    pub points: usize,

    /// Candle width in minutes.
    pub interval_minutes: u32,
}

impl CandlesRequest {
    pub fn new(symbol: impl Into<String>, points: usize, interval_minutes: u32) -> Self {
        Self {
            symbol: symbol.into(),
            points,
            interval_minutes,
        }
    }
}
