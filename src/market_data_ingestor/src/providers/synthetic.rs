//! Random-walk candle generator.
//!
//! Each candle opens at the previous close and drifts by uniform noise in
//! `[-max_drift / 2, max_drift / 2)`; the close is floored at `price_floor`.
//! Wicks extend the body by up to `max_wick` on each side, so every generated
//! candle is well formed.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    models::{candle::Candle, news::NewsItem, request_params::CandlesRequest},
    providers::{DataProvider, ProviderError, mock_news::mock_news},
};

/// Shape of the random walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticParams {
    /// Lowest possible starting price.
    pub base_price: f64,
    /// The starting price is `base_price + u * start_jitter`.
    pub start_jitter: f64,
    /// Full width of the per-candle drift range.
    pub max_drift: f64,
    /// Largest wick beyond the body, per side.
    pub max_wick: f64,
    /// Closes never go below this.
    pub price_floor: f64,
    /// Seconds between consecutive candles.
    pub spacing_secs: i64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            base_price: 2350.0,
            start_jitter: 30.0,
            max_drift: 4.0,
            max_wick: 2.5,
            price_floor: 1.0,
            spacing_secs: 60,
        }
    }
}

/// Generates `points` candles ending at `now`, the first opening at `start_price`.
pub fn generate_candles<R: Rng + ?Sized>(
    rng: &mut R,
    points: usize,
    start_price: f64,
    now: DateTime<Utc>,
    params: &SyntheticParams,
) -> Vec<Candle> {
    let now_secs = now.timestamp();
    let mut price = start_price;

    (0..points)
        .rev()
        .map(|i| {
            let drift = (rng.random::<f64>() - 0.5) * params.max_drift;
            let open = price;
            let close = (open + drift).max(params.price_floor);
            let high = open.max(close) + rng.random::<f64>() * params.max_wick;
            let low = open.min(close) - rng.random::<f64>() * params.max_wick;
            price = close;

            Candle {
                time: now_secs - i as i64 * params.spacing_secs,
                open,
                high,
                low,
                close,
            }
        })
        .collect()
}

/// Serves random-walk candles and the mock headlines.
///
/// The walk restarts from a fresh jittered price on every call; symbol and
/// interval are ignored.
pub struct SyntheticProvider {
    params: SyntheticParams,
    rng: Mutex<StdRng>,
}

impl SyntheticProvider {
    pub fn new(params: SyntheticParams) -> Self {
        Self {
            params,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic variant for tests and reproducible demos.
    pub fn with_seed(params: SyntheticParams, seed: u64) -> Self {
        Self {
            params,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn params(&self) -> &SyntheticParams {
        &self.params
    }

    /// Synchronous core of [`DataProvider::fetch_candles`].
    pub fn candles(&self, points: usize) -> Vec<Candle> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let start = self.params.base_price + rng.random::<f64>() * self.params.start_jitter;
        generate_candles(&mut *rng, points, start, Utc::now(), &self.params)
    }
}

#[async_trait]
impl DataProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn fetch_candles(&self, req: CandlesRequest) -> Result<Vec<Candle>, ProviderError> {
        Ok(self.candles(req.points))
    }

    async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, ProviderError> {
        Ok(mock_news(symbol, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn spacing_and_end_time() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 15, 30, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let out = generate_candles(&mut rng, 120, 2350.0, now, &SyntheticParams::default());

        assert_eq!(out.len(), 120);
        assert_eq!(out.last().unwrap().time, now.timestamp());
        assert_eq!(out[0].time, now.timestamp() - 119 * 60);
        assert!(out.windows(2).all(|w| w[1].time - w[0].time == 60));
    }

    #[test]
    fn walk_is_continuous_and_well_formed() {
        let mut rng = StdRng::seed_from_u64(2);
        let params = SyntheticParams::default();
        let out = generate_candles(&mut rng, 500, 2350.0, Utc::now(), &params);

        assert_eq!(out[0].open, 2350.0);
        for w in out.windows(2) {
            assert_eq!(w[1].open, w[0].close);
        }
        for c in &out {
            assert!(c.is_well_formed(), "{c:?}");
            assert!((c.close - c.open).abs() <= params.max_drift / 2.0 + 1e-9);
        }
    }

    #[test]
    fn closes_are_floored() {
        let mut rng = StdRng::seed_from_u64(3);
        let out = generate_candles(&mut rng, 200, 1.5, Utc::now(), &SyntheticParams::default());
        assert!(out.iter().all(|c| c.close >= 1.0));
    }

    #[test]
    fn zero_points_is_empty() {
        let mut rng = StdRng::seed_from_u64(4);
        let out = generate_candles(&mut rng, 0, 10.0, Utc::now(), &SyntheticParams::default());
        assert!(out.is_empty());
    }

    #[test]
    fn seeded_providers_repeat() {
        let a = SyntheticProvider::with_seed(SyntheticParams::default(), 9);
        let b = SyntheticProvider::with_seed(SyntheticParams::default(), 9);
        let (ca, cb) = (a.candles(30), b.candles(30));
        let prices = |cs: &[Candle]| cs.iter().map(|c| c.close).collect::<Vec<_>>();
        assert_eq!(prices(&ca), prices(&cb));
    }

    #[test]
    fn start_price_stays_within_jitter() {
        let p = SyntheticProvider::with_seed(SyntheticParams::default(), 5);
        for _ in 0..20 {
            let first = p.candles(1)[0];
            assert!((2350.0..2380.0).contains(&first.open));
        }
    }
}
