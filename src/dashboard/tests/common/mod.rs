#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use market_data_ingestor::{
    models::{candle::Candle, news::NewsItem, request_params::CandlesRequest},
    providers::{DataProvider, ProviderError, ValidationSnafu},
};

/// Call log shared between a [`ScriptedProvider`] and the test holding it.
#[derive(Clone, Default)]
pub struct CallLog {
    requests: Arc<Mutex<Vec<CandlesRequest>>>,
    news_calls: Arc<AtomicUsize>,
}

impl CallLog {
    pub fn requests(&self) -> Vec<CandlesRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn news_calls(&self) -> usize {
        self.news_calls.load(Ordering::SeqCst)
    }
}

/// Deterministic provider: closes follow `start + step * i`.
pub struct ScriptedProvider {
    pub start: f64,
    pub step: f64,
    pub news_scores: Vec<i64>,
    pub fail_news: bool,
    pub delay: Option<Duration>,
    pub calls: CallLog,
}

impl ScriptedProvider {
    pub fn trending(start: f64, step: f64, news_scores: &[i64]) -> Self {
        Self {
            start,
            step,
            news_scores: news_scores.to_vec(),
            fail_news: false,
            delay: None,
            calls: CallLog::default(),
        }
    }

    pub fn failing_news() -> Self {
        Self {
            fail_news: true,
            ..Self::trending(100.0, 1.0, &[])
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::trending(100.0, 1.0, &[])
        }
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_candles(&self, req: CandlesRequest) -> Result<Vec<Candle>, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let candles = (0..req.points)
            .map(|i| {
                let close = self.start + self.step * i as f64;
                Candle {
                    time: i as i64 * 60,
                    open: close - self.step,
                    high: close.max(close - self.step) + 0.5,
                    low: close.min(close - self.step) - 0.5,
                    close,
                }
            })
            .collect();
        self.calls.requests.lock().unwrap().push(req);
        Ok(candles)
    }

    async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, ProviderError> {
        self.calls.news_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_news {
            return ValidationSnafu {
                message: format!("news feed down for {symbol}"),
            }
            .fail();
        }
        Ok(self
            .news_scores
            .iter()
            .enumerate()
            .map(|(i, &score)| NewsItem {
                title: format!("headline {i} for {symbol}"),
                url: "#".to_string(),
                published_at: Utc.with_ymd_and_hms(2025, 3, 14, 12 + i as u32, 30, 0).unwrap(),
                score,
            })
            .collect())
    }
}
