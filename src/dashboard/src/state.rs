//! Latest market data for the selected asset and the refresh cycle that replaces it.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::Context;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use market_data_ingestor::{
    aggregate::aggregate,
    models::{candle::Candle, news::NewsItem, request_params::CandlesRequest},
    providers::{DataProvider, registry::build_provider},
};
use tracing::{debug, info};

use crate::{config::DashboardConfig, view::DashboardView};

/// Everything loaded for one asset in one refresh.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub fetched_at: DateTime<Utc>,
    /// Aggregated candles per configured timeframe key, in config order.
    pub candles_by_timeframe: IndexMap<String, Vec<Candle>>,
    pub news: Vec<NewsItem>,
}

impl MarketSnapshot {
    /// Snapshot shown before the first refresh completes.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            fetched_at: DateTime::<Utc>::UNIX_EPOCH,
            candles_by_timeframe: IndexMap::new(),
            news: Vec::new(),
        }
    }

    /// Candles for `key`, or `None` when that timeframe was not loaded.
    pub fn candles(&self, key: &str) -> Option<&[Candle]> {
        self.candles_by_timeframe.get(key).map(Vec::as_slice)
    }
}

/// Result of [`Dashboard::try_refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// Another refresh was already in flight.
    Skipped,
}

/// Holds the loading flag for the duration of a refresh and clears it on drop,
/// including when the refresh fails.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }

    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    provider: Box<dyn DataProvider + Send + Sync>,
    snapshot: ArcSwap<MarketSnapshot>,
    loading: AtomicBool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, provider: Box<dyn DataProvider + Send + Sync>) -> Self {
        let snapshot = ArcSwap::from_pointee(MarketSnapshot::empty(config.default_asset.clone()));
        Self {
            config,
            provider,
            snapshot,
            loading: AtomicBool::new(false),
        }
    }

    /// Builds the provider named by `config.data_source`.
    pub fn from_config(config: DashboardConfig) -> anyhow::Result<Self> {
        let provider = build_provider(config.data_source, config.synthetic, &config.live)
            .context("failed to initialise data provider")?;
        Ok(Self::new(config, provider))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Current snapshot. Readers never see a partially refreshed one.
    pub fn snapshot(&self) -> Arc<MarketSnapshot> {
        self.snapshot.load_full()
    }

    /// Loads every timeframe and the headlines for `symbol`, then swaps the
    /// snapshot. On error the previous snapshot stays in place.
    pub async fn refresh(&self, symbol: &str) -> anyhow::Result<()> {
        let _guard = LoadingGuard::acquire(&self.loading);
        self.load_and_store(symbol).await
    }

    /// Like [`Dashboard::refresh`], but does nothing while another refresh is running.
    pub async fn try_refresh(&self, symbol: &str) -> anyhow::Result<RefreshOutcome> {
        let Some(_guard) = LoadingGuard::try_acquire(&self.loading) else {
            debug!(symbol, "refresh already in flight, skipping");
            return Ok(RefreshOutcome::Skipped);
        };
        self.load_and_store(symbol).await?;
        Ok(RefreshOutcome::Refreshed)
    }

    /// Owned [`Dashboard::try_refresh`] future, for running on its own task.
    pub fn refresh_task(
        self: &Arc<Self>,
        symbol: &str,
    ) -> impl Future<Output = anyhow::Result<RefreshOutcome>> + Send + use<> {
        let dash = Arc::clone(self);
        let symbol = symbol.to_string();
        async move { dash.try_refresh(&symbol).await }
    }

    async fn load_and_store(&self, symbol: &str) -> anyhow::Result<()> {
        let snapshot = self.load(symbol).await?;
        info!(
            symbol,
            timeframes = snapshot.candles_by_timeframe.len(),
            headlines = snapshot.news.len(),
            "snapshot refreshed"
        );
        self.snapshot.store(Arc::new(snapshot));
        Ok(())
    }

    async fn load(&self, symbol: &str) -> anyhow::Result<MarketSnapshot> {
        let mut candles_by_timeframe = IndexMap::with_capacity(self.config.timeframes.len());
        for (key, tf) in &self.config.timeframes {
            let raw = self
                .provider
                .fetch_candles(CandlesRequest::new(symbol, tf.points, tf.interval_minutes))
                .await
                .with_context(|| format!("failed to load {key} candles for {symbol}"))?;
            let candles = aggregate(&raw, tf.interval_minutes);
            debug!(
                symbol,
                timeframe = %key,
                raw = raw.len(),
                aggregated = candles.len(),
                "timeframe loaded"
            );
            candles_by_timeframe.insert(key.clone(), candles);
        }

        let news = self
            .provider
            .fetch_news(symbol)
            .await
            .with_context(|| format!("failed to load news for {symbol}"))?;

        Ok(MarketSnapshot {
            symbol: symbol.to_string(),
            fetched_at: Utc::now(),
            candles_by_timeframe,
            news,
        })
    }

    /// View model of the current snapshot with `active_tab` selected.
    pub fn view(&self, active_tab: Option<&str>) -> DashboardView {
        DashboardView::build(&self.snapshot(), &self.config, active_tab, self.is_loading())
    }
}
