//! Provider abstraction for candle and headline sources.
//!
//! This module defines the [`DataProvider`] trait, the single interface the
//! dashboard uses to load candles and news, whatever sits behind it.
//!
//! - [`synthetic::SyntheticProvider`]: random-walk candles and fixed mock headlines.
//! - [`live_rest::provider::LiveProvider`]: JSON over HTTP when an endpoint is
//!   configured, synthetic fallback otherwise.
//! - [`registry::build_provider`]: picks one from an injected
//!   [`registry::DataSource`].
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{
//!     candle::Candle, news::NewsItem, request_params::CandlesRequest,
//! };
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     fn name(&self) -> &'static str {
//!         "mine"
//!     }
//!
//!     async fn fetch_candles(&self, _req: CandlesRequest) -> Result<Vec<Candle>, ProviderError> {
//!         Ok(vec![])
//!     }
//!
//!     async fn fetch_news(&self, _symbol: &str) -> Result<Vec<NewsItem>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod live_rest;
pub mod mock_news;
pub mod registry;
pub mod synthetic;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{candle::Candle, news::NewsItem, request_params::CandlesRequest};

/// Trait for fetching candles and headlines from a market data source.
#[async_trait]
pub trait DataProvider {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fetches `req.points` candles for `req.symbol`, ordered by time and
    /// ending at the most recent one.
    async fn fetch_candles(&self, req: CandlesRequest) -> Result<Vec<Candle>, ProviderError>;

    /// Fetches the latest scored headlines for `symbol`.
    async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// The configured endpoint is not an absolute http(s) URL.
    #[snafu(display("Invalid base URL '{url}': {message}"))]
    InvalidBaseUrl {
        url: String,
        message: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The endpoint answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The response body was not the expected JSON.
    #[snafu(display("Failed to decode {what} response: {source}"))]
    Decode {
        what: &'static str,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },
}
