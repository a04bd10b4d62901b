//! Fixed headlines served while no news feed is wired in.

use chrono::{DateTime, Duration, Utc};
use signal_engine::sentiment::simple_sentiment;

use crate::models::news::NewsItem;

struct Headline {
    title: &'static str,
    hours_ago: i64,
    /// Keywords the score is derived from.
    tone: &'static str,
}

const HEADLINES: [Headline; 3] = [
    Headline {
        title: "fluxo comprador aumenta após dados de inflação",
        hours_ago: 0,
        tone: "otimista cresce fluxo comprador acima",
    },
    Headline {
        title: "dólar forte pressiona metais; realização de lucros",
        hours_ago: 2,
        tone: "queda fluxo vendedor alerta",
    },
    Headline {
        title: "demanda física na Ásia sustenta preços no curto prazo",
        hours_ago: 22,
        tone: "alta acima",
    },
];

/// Three headlines about `symbol`, newest first, published relative to `now`.
pub fn mock_news(symbol: &str, now: DateTime<Utc>) -> Vec<NewsItem> {
    HEADLINES
        .iter()
        .map(|h| NewsItem {
            title: format!("Ouro ({symbol}): {}", h.title),
            url: "#".to_string(),
            published_at: now - Duration::hours(h.hours_ago),
            score: simple_sentiment(h.tone),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn scores_and_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let news = mock_news("XAUUSD", now);

        assert_eq!(news.len(), 3);
        assert_eq!(
            news.iter().map(|n| n.score).collect::<Vec<_>>(),
            vec![4, -3, 2]
        );
        assert_eq!(news[0].published_at, now);
        assert_eq!(news[1].published_at, Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap());
        assert_eq!(news[2].published_at, Utc.with_ymd_and_hms(2025, 3, 13, 14, 0, 0).unwrap());
        assert!(news.iter().all(|n| n.title.starts_with("Ouro (XAUUSD): ")));
        assert!(news.iter().all(|n| n.url == "#"));
    }
}
