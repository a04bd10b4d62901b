use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shared_utils::env::get_env_var;
use snafu::{ResultExt, ensure};
use tracing::{debug, warn};

use crate::{
    models::{candle::Candle, news::NewsItem, request_params::CandlesRequest},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidApiKeySnafu,
        InvalidBaseUrlSnafu, MissingEnvVarSnafu, ProviderError, ProviderInitError, ReqwestSnafu,
        live_rest::{
            params::{LiveParams, candles_query, endpoint_url, news_query},
            response::{LiveCandle, LiveNewsItem, into_candles, into_news},
        },
        synthetic::{SyntheticParams, SyntheticProvider},
    },
};

/// Starting-price jitter used when the stub falls back to synthetic candles.
pub const FALLBACK_START_JITTER: f64 = 20.0;

struct Endpoint {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
    _api_key: Option<SecretString>,
}

pub struct LiveProvider {
    endpoint: Option<Endpoint>,
    fallback: SyntheticProvider,
}

impl LiveProvider {
    /// Creates a new live provider.
    ///
    /// Without `params.base_url` no client is built and every call is served
    /// by a synthetic fallback. When `params.api_key_env` is set, the token is
    /// read from that environment variable and sent as a bearer header.
    pub fn new(params: &LiveParams, synthetic: SyntheticParams) -> Result<Self, ProviderInitError> {
        let fallback = SyntheticProvider::new(SyntheticParams {
            start_jitter: FALLBACK_START_JITTER,
            ..synthetic
        });

        let Some(base_url) = params.base_url.as_deref() else {
            return Ok(Self {
                endpoint: None,
                fallback,
            });
        };

        ensure!(
            base_url.starts_with("http://") || base_url.starts_with("https://"),
            InvalidBaseUrlSnafu {
                url: base_url,
                message: "expected an http:// or https:// URL",
            }
        );

        let api_key = match params.api_key_env.as_deref() {
            Some(var) => Some(SecretString::new(
                get_env_var(var).context(MissingEnvVarSnafu)?.into(),
            )),
            None => None,
        };

        let mut headers = header::HeaderMap::new();
        if let Some(key) = &api_key {
            let mut value =
                header::HeaderValue::from_str(&format!("Bearer {}", key.expose_secret()))
                    .context(InvalidApiKeySnafu)?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            endpoint: Some(Endpoint {
                client,
                base_url: base_url.to_string(),
                limiter: RateLimiter::direct(Quota::per_second(params.requests_per_second)),
                _api_key: api_key,
            }),
            fallback,
        })
    }

    /// `false` while running as the synthetic stub.
    pub fn is_connected(&self) -> bool {
        self.endpoint.is_some()
    }
}

impl Endpoint {
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        what: &'static str,
    ) -> Result<T, ProviderError> {
        self.limiter.until_ready().await;

        let url = endpoint_url(&self.base_url, path);
        debug!(%url, "live request");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu {
                status: status.as_u16(),
                message,
            }
            .fail();
        }

        let body = response.text().await.context(ReqwestSnafu)?;
        serde_json::from_str(&body).context(DecodeSnafu { what })
    }
}

#[async_trait]
impl DataProvider for LiveProvider {
    fn name(&self) -> &'static str {
        if self.is_connected() { "live" } else { "live-stub" }
    }

    async fn fetch_candles(&self, req: CandlesRequest) -> Result<Vec<Candle>, ProviderError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(self.fallback.candles(req.points));
        };

        let raw: Vec<LiveCandle> = endpoint
            .get_json("/api/candles", &candles_query(&req), "candles")
            .await?;
        let candles = into_candles(raw);
        if candles.len() != req.points {
            warn!(
                symbol = %req.symbol,
                wanted = req.points,
                got = candles.len(),
                "live endpoint returned a different number of candles"
            );
        }
        Ok(candles)
    }

    async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, ProviderError> {
        let Some(endpoint) = &self.endpoint else {
            return self.fallback.fetch_news(symbol).await;
        };

        let raw: Vec<LiveNewsItem> = endpoint
            .get_json("/api/news", &news_query(symbol), "news")
            .await?;
        Ok(into_news(raw))
    }
}
