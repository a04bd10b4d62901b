//! Candle and headline sources for the gold dashboard.
//!
//! - [`models`]: vendor-agnostic [`Candle`](models::candle::Candle),
//!   [`NewsItem`](models::news::NewsItem) and request types.
//! - [`aggregate`]: downsampling of a fine candle series into coarser buckets.
//! - [`providers`]: the [`DataProvider`](providers::DataProvider) trait, its
//!   synthetic and live implementations, and the registry that picks one from
//!   an injected [`DataSource`](providers::registry::DataSource).

#[cfg(feature = "cli")]
pub mod cli;
pub mod aggregate;
pub mod models;
pub mod providers;
