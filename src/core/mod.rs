//! Core module for the dashboard: data resolution, loading, normalization and metrics

pub mod config;
pub mod dashboard;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod resolver;
pub mod sample;

/// Returns the current version of the `sdg-dashboard` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
