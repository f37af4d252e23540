//! Export command handler

use super::load_snapshot;
use crate::args::SelectionArgs;
use sdg_dashboard::config::Config;
use sdg_dashboard::core::dashboard::ensure_renderable;
use sdg_dashboard::core::export::export_snapshot_csv;
use std::path::{Path, PathBuf};

/// Write the counts (and percentages, when present) of one snapshot as CSV
pub fn run(args: &SelectionArgs, out: Option<&Path>, config: &Config) {
    let loaded = load_snapshot(args, config);
    let snapshot = match ensure_renderable(&loaded) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let out_dir = out.map_or_else(|| PathBuf::from(&config.paths.export_dir), Path::to_path_buf);
    if out_dir.as_os_str().is_empty() {
        eprintln!("✗ No export directory; pass --out or set paths.export_dir");
        std::process::exit(1);
    }

    match export_snapshot_csv(&loaded.selection, snapshot, &out_dir) {
        Ok(summary) => {
            println!("✓ Counts exported to: {}", summary.counts_path.display());
            match summary.percentages_path {
                Some(path) => println!("✓ Percentages exported to: {}", path.display()),
                None => println!("- No percentage table for this data type"),
            }
        }
        Err(e) => {
            eprintln!("✗ Export failed: {e}");
            std::process::exit(1);
        }
    }
}
