//! Provider registry that maps an injected [`DataSource`] to a concrete provider.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::providers::{
    DataProvider, ProviderInitError,
    live_rest::{params::LiveParams, provider::LiveProvider},
    synthetic::{SyntheticParams, SyntheticProvider},
};

/// Which upstream to use (serde snake_case).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Random-walk candles and mock headlines.
    #[default]
    Synthetic,
    /// HTTP endpoint, or its synthetic stub when none is configured.
    Live,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown data source '{0}' (expected 'synthetic' or 'live')")]
pub struct UnknownDataSource(pub String);

impl FromStr for DataSource {
    type Err = UnknownDataSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "synthetic" | "mock" => Ok(DataSource::Synthetic),
            "live" => Ok(DataSource::Live),
            _ => Err(UnknownDataSource(s.to_string())),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataSource::Synthetic => "synthetic",
            DataSource::Live => "live",
        })
    }
}

/// Build and return a boxed data provider corresponding to the supplied source.
pub fn build_provider(
    source: DataSource,
    synthetic: SyntheticParams,
    live: &LiveParams,
) -> Result<Box<dyn DataProvider + Send + Sync>, ProviderInitError> {
    let provider: Box<dyn DataProvider + Send + Sync> = match source {
        DataSource::Synthetic => Box::new(SyntheticProvider::new(synthetic)),
        DataSource::Live => Box::new(LiveProvider::new(live, synthetic)?),
    };
    info!(%source, provider = provider.name(), "data provider ready");
    Ok(provider)
}
