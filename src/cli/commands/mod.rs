//! CLI command handlers for `sdgdash`.
//!
//! Each command is implemented in its own submodule. The helpers here turn
//! the shared `--type`/`--year` flags into a loaded snapshot.

pub mod config;
pub mod export;
pub mod views;

use crate::args::SelectionArgs;
use sdg_dashboard::config::Config;
use sdg_dashboard::core::dashboard::{load_or_sample, LoadedSnapshot};
use sdg_dashboard::core::models::{DataType, Selection};
use sdg_dashboard::core::resolver::SourceResolver;
use sdg_dashboard::verbose;

/// Combine CLI selection flags with the configured defaults
///
/// # Errors
/// Returns an error if no year is given and none is configured, or if the
/// configured default type is not a known data type.
pub fn resolve_selection(args: &SelectionArgs, config: &Config) -> Result<Selection, String> {
    let data_type = match args.data_type {
        Some(data_type) => data_type,
        None if config.data.default_type.is_empty() => DataType::Course,
        None => config.data.default_type.parse()?,
    };

    let year = args
        .year
        .clone()
        .or_else(|| Some(config.data.default_year.clone()).filter(|year| !year.is_empty()))
        .ok_or("No year given; pass --year or set data.default_year")?;

    Ok(Selection::new(data_type, year))
}

/// Load the snapshot for a command, exiting on an invalid selection
pub fn load_snapshot(args: &SelectionArgs, config: &Config) -> LoadedSnapshot {
    let selection = resolve_selection(args, config).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    let resolver = SourceResolver::from_config(&config.data);
    verbose!(
        "Loading {} {} data from {}",
        selection.data_type.label(),
        selection.year,
        resolver.select_root().display()
    );

    let loaded = load_or_sample(&resolver, &selection);
    if loaded.source.is_sample() {
        println!("⚠ Showing sample data: {}", loaded.source);
    }
    loaded
}
