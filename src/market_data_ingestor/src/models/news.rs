use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scored headline.
///
/// `score` is an unbounded integer, positive for bullish wording and negative
/// for bearish wording (see [`signal_engine::sentiment`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub score: i64,
}
