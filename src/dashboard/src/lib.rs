//! Gold dashboard: refresh cycle, view model and renderers.
//!
//! [`state::Dashboard`] owns the data provider and the latest
//! [`state::MarketSnapshot`]; [`view::DashboardView`] turns a snapshot into
//! everything a screen shows; [`render`] draws it.

pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod state;
pub mod view;
