//! Numeric core of the gold dashboard.
//!
//! Everything in this crate is synchronous and pure: closing prices go in,
//! indicator series, sentiment scores and a consolidated [`signal::Signal`]
//! come out. Nothing here knows where candles or headlines come from.

#![deny(missing_docs)]

pub mod indicators;
pub mod sentiment;
pub mod signal;
pub mod snapshot;
