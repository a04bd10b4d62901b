//! View model: everything the dashboard shows, derived from one snapshot.
//!
//! Indicators and the signal are recomputed on every build. Nothing here is
//! formatted except headline timestamps, which depend on the display zone.

use chrono::{DateTime, Utc};
use market_data_ingestor::models::candle::{Candle, closes};
use serde::Serialize;
use signal_engine::{
    indicators::pct_change,
    sentiment::sentiment_sum,
    signal::{Signal, combine},
    snapshot::IndicatorSnapshot,
};

use crate::{config::DashboardConfig, state::MarketSnapshot};

/// Timestamp layout for the news feed.
pub const NEWS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceKpi {
    /// Last close of the base timeframe, `0.0` when there is none.
    pub now: f64,
    /// Second-last close, or `now` when there is only one candle.
    pub prev: f64,
    /// Percent change from `prev` to `now`. May be non-finite.
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTab {
    pub key: String,
    pub label: String,
    pub active: bool,
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsRow {
    pub title: String,
    pub url: String,
    /// `published_at` in the display time zone.
    pub published: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub symbol: String,
    pub asset_label: String,
    pub fetched_at: DateTime<Utc>,
    pub loading: bool,
    pub price: PriceKpi,
    /// Timeframe the indicators were computed on, `None` before any data.
    pub indicator_basis: Option<String>,
    pub indicators: IndicatorSnapshot,
    pub sentiment_sum: i64,
    pub signal: Signal,
    pub tabs: Vec<ChartTab>,
    pub news: Vec<NewsRow>,
}

impl DashboardView {
    /// Builds the view for `snapshot`. `active_tab` falls back to the first
    /// configured timeframe when absent or unknown.
    pub fn build(
        snapshot: &MarketSnapshot,
        config: &DashboardConfig,
        active_tab: Option<&str>,
        loading: bool,
    ) -> Self {
        let price = price_kpi(snapshot.candles(&config.base_timeframe).unwrap_or_default());

        let basis = [&config.base_timeframe, &config.fallback_timeframe]
            .into_iter()
            .find(|key| snapshot.candles(key).is_some());
        let indicators = match basis.and_then(|key| snapshot.candles(key)) {
            Some(candles) => IndicatorSnapshot::from_closes(&closes(candles), &config.indicators),
            None => IndicatorSnapshot::default(),
        };

        let sentiment = sentiment_sum(snapshot.news.iter().map(|n| n.score));
        let signal = combine(&indicators, sentiment);

        let active = active_tab
            .filter(|key| config.timeframes.contains_key(*key))
            .or_else(|| config.timeframes.keys().next().map(String::as_str));
        let tabs = config
            .timeframes
            .iter()
            .map(|(key, tf)| ChartTab {
                key: key.clone(),
                label: tf.label.clone(),
                active: Some(key.as_str()) == active,
                candles: snapshot.candles(key).unwrap_or_default().to_vec(),
            })
            .collect();

        let news = snapshot
            .news
            .iter()
            .map(|n| NewsRow {
                title: n.title.clone(),
                url: n.url.clone(),
                published: n
                    .published_at
                    .with_timezone(&config.display_timezone)
                    .format(NEWS_TIME_FORMAT)
                    .to_string(),
                score: n.score,
            })
            .collect();

        let asset_label = config
            .asset(&snapshot.symbol)
            .map(|a| a.label.clone())
            .unwrap_or_else(|_| snapshot.symbol.clone());

        Self {
            symbol: snapshot.symbol.clone(),
            asset_label,
            fetched_at: snapshot.fetched_at,
            loading,
            price,
            indicator_basis: basis.cloned(),
            indicators,
            sentiment_sum: sentiment,
            signal,
            tabs,
            news,
        }
    }

    /// The selected chart tab, if any timeframe is configured.
    pub fn active_tab(&self) -> Option<&ChartTab> {
        self.tabs.iter().find(|t| t.active)
    }
}

fn price_kpi(candles: &[Candle]) -> PriceKpi {
    let now = candles.last().map_or(0.0, |c| c.close);
    let prev = match candles {
        [.., prev, _] => prev.close,
        _ => now,
    };
    PriceKpi {
        now,
        prev,
        change_pct: pct_change(Some(now), Some(prev)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64, close: f64) -> Candle {
        Candle {
            time,
            open: close,
            high: close,
            low: close,
            close,
        }
    }

    #[test]
    fn price_from_last_two_closes() {
        let kpi = price_kpi(&[candle(0, 90.0), candle(60, 100.0), candle(120, 110.0)]);
        assert_eq!(kpi.now, 110.0);
        assert_eq!(kpi.prev, 100.0);
        assert!((kpi.change_pct - 10.0).abs() < 1e-12);
    }

    #[test]
    fn single_candle_has_no_change() {
        let kpi = price_kpi(&[candle(0, 42.0)]);
        assert_eq!((kpi.now, kpi.prev, kpi.change_pct), (42.0, 42.0, 0.0));
    }

    #[test]
    fn no_candles_gives_nan_change() {
        let kpi = price_kpi(&[]);
        assert_eq!(kpi.now, 0.0);
        assert!(kpi.change_pct.is_nan());
    }

    #[test]
    fn empty_snapshot_view() {
        let cfg = DashboardConfig::default();
        let view = DashboardView::build(&MarketSnapshot::empty("GLD"), &cfg, Some("nope"), true);

        assert_eq!(view.asset_label, "GLD ETF");
        assert!(view.loading);
        assert_eq!(view.indicator_basis, None);
        assert_eq!(view.indicators, IndicatorSnapshot::default());
        assert_eq!(view.signal.score, 0.0);
        assert_eq!(view.tabs.len(), 5);
        assert_eq!(view.active_tab().map(|t| t.key.as_str()), Some("1h"));
        assert!(view.tabs.iter().all(|t| t.candles.is_empty()));
    }
}
