use chrono::{DateTime, Utc};
use serde::Deserialize;
use signal_engine::sentiment::simple_sentiment;
use tracing::warn;

use crate::models::{candle::Candle, news::NewsItem};

/// Candle as served by the endpoint. Accepts both long and one-letter keys.
#[derive(Deserialize, Debug)]
pub struct LiveCandle {
    #[serde(alias = "t")]
    pub time: i64,
    #[serde(alias = "o")]
    pub open: f64,
    #[serde(alias = "h")]
    pub high: f64,
    #[serde(alias = "l")]
    pub low: f64,
    #[serde(alias = "c")]
    pub close: f64,
}

/// Headline as served by the endpoint. Unscored items are scored locally.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LiveNewsItem {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub score: Option<i64>,
}

/// Orders by time and drops repeated timestamps (first one wins).
///
/// Bars whose high/low do not enclose open and close are dropped.
pub fn into_candles(raw: Vec<LiveCandle>) -> Vec<Candle> {
    let mut candles: Vec<Candle> = raw
        .into_iter()
        .map(|c| Candle {
            time: c.time,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
        })
        .filter(|c| {
            let ok = c.is_well_formed();
            if !ok {
                warn!(?c, "dropping malformed live candle");
            }
            ok
        })
        .collect();
    candles.sort_by_key(|c| c.time);
    candles.dedup_by_key(|c| c.time);
    candles
}

pub fn into_news(raw: Vec<LiveNewsItem>) -> Vec<NewsItem> {
    raw.into_iter()
        .map(|n| NewsItem {
            score: n.score.unwrap_or_else(|| simple_sentiment(&n.title)),
            url: n.url.unwrap_or_else(|| "#".to_string()),
            title: n.title,
            published_at: n.published_at,
        })
        .collect()
}
