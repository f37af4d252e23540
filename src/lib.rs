//! Shared library for `sdg-dashboard`
//! Loads SDG mapping snapshots and derives the metrics used by every dashboard view

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
