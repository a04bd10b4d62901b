//! JSON-over-HTTP candle and news source.
//!
//! Expects an endpoint exposing `GET /api/candles?symbol=&points=&interval=`
//! and `GET /api/news?symbol=`. With no endpoint configured the provider
//! behaves as a stub and serves synthetic data instead.

pub mod params;
pub mod provider;
pub mod response;
