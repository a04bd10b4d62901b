//! Small helpers shared by the dashboard workspace crates.

pub mod env;
