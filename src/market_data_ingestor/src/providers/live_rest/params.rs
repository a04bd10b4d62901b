use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::models::request_params::CandlesRequest;

const DEFAULT_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Live endpoint settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LiveParams {
    /// Endpoint root, e.g. `https://quotes.example.com`. `None` keeps the stub behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Name of the environment variable holding a bearer token, if the endpoint wants one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Client-side request pacing.
    pub requests_per_second: NonZeroU32,
}

impl Default for LiveParams {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key_env: None,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }
}

/// Query string for `/api/candles`.
pub fn candles_query(req: &CandlesRequest) -> Vec<(&'static str, String)> {
    vec![
        ("symbol", req.symbol.clone()),
        ("points", req.points.to_string()),
        ("interval", req.interval_minutes.to_string()),
    ]
}

/// Query string for `/api/news`.
pub fn news_query(symbol: &str) -> Vec<(&'static str, String)> {
    vec![("symbol", symbol.to_string())]
}

/// Joins the endpoint root and a path, tolerating a trailing slash on the root.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
