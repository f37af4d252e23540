//! Export snapshot tables to CSV
//!
//! Files start with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding for the Chinese unit names.

use super::models::{CountsTable, PercentageTable, Selection, Snapshot};
use super::normalize::UNIT_COLUMN;
use crate::{debug, error, info};
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// UTF-8 byte-order mark written before the header row
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Trait for exporting snapshot tables in different formats
pub trait TableExporter {
    /// Export the tables of one snapshot into `out_dir`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or a file cannot
    /// be written
    fn export(
        &self,
        selection: &Selection,
        snapshot: &Snapshot,
        out_dir: &Path,
    ) -> Result<ExportSummary, Box<dyn Error>>;
}

/// Files written by one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Per-unit counts file
    pub counts_path: PathBuf,
    /// Per-unit percentages file; `None` when the snapshot has no percentages
    pub percentages_path: Option<PathBuf>,
}

/// CSV exporter for snapshot tables
pub struct CsvExporter;

impl TableExporter for CsvExporter {
    fn export(
        &self,
        selection: &Selection,
        snapshot: &Snapshot,
        out_dir: &Path,
    ) -> Result<ExportSummary, Box<dyn Error>> {
        fs::create_dir_all(out_dir)?;

        let counts_path = out_dir.join(counts_file_name(selection));
        write_counts_csv(&snapshot.counts, File::create(&counts_path)?)?;
        debug!(
            "Wrote {} unit rows to {}",
            snapshot.counts.len(),
            counts_path.display()
        );

        let percentages_path = if snapshot.percentages.is_empty() {
            debug!("No percentage table for {selection}, skipping");
            None
        } else {
            let path = out_dir.join(percentages_file_name(selection));
            write_percentages_csv(&snapshot.percentages, File::create(&path)?)?;
            Some(path)
        };

        Ok(ExportSummary {
            counts_path,
            percentages_path,
        })
    }
}

/// `<type>_<year>_counts.csv`
#[must_use]
pub fn counts_file_name(selection: &Selection) -> String {
    format!(
        "{}_{}_counts.csv",
        selection.data_type.as_str(),
        selection.year
    )
}

/// `<type>_<year>_percentages.csv`
#[must_use]
pub fn percentages_file_name(selection: &Selection) -> String {
    format!(
        "{}_{}_percentages.csv",
        selection.data_type.as_str(),
        selection.year
    )
}

/// Write the counts table as BOM-prefixed CSV
///
/// The header is the unit column followed by the table's columns in order.
/// Missing cells are written empty.
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn write_counts_csv<W: Write>(table: &CountsTable, mut out: W) -> Result<(), Box<dyn Error>> {
    out.write_all(UTF8_BOM)?;
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(header(&table.columns))?;
    for row in &table.rows {
        let mut record = vec![row.unit_name.clone()];
        record.extend(
            table
                .columns
                .iter()
                .map(|column| row.cell(column).map_or_else(String::new, |v| v.to_string())),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the percentage table as BOM-prefixed CSV
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn write_percentages_csv<W: Write>(
    table: &PercentageTable,
    mut out: W,
) -> Result<(), Box<dyn Error>> {
    out.write_all(UTF8_BOM)?;
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(header(&table.columns))?;
    for row in &table.rows {
        let mut record = vec![row.unit_name.clone()];
        record.extend(
            table
                .columns
                .iter()
                .map(|column| row.cell(column).map_or_else(String::new, |v| v.to_string())),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn header(columns: &[String]) -> Vec<&str> {
    std::iter::once(UNIT_COLUMN)
        .chain(columns.iter().map(String::as_str))
        .collect()
}

/// Convenience function to export a snapshot using the default CSV exporter
///
/// # Errors
/// Returns an error if any file cannot be written; the failure is also logged
pub fn export_snapshot_csv<P: AsRef<Path>>(
    selection: &Selection,
    snapshot: &Snapshot,
    out_dir: P,
) -> Result<ExportSummary, Box<dyn Error>> {
    let out_dir = out_dir.as_ref();
    match CsvExporter.export(selection, snapshot, out_dir) {
        Ok(summary) => {
            info!("Exported {selection} to {}", out_dir.display());
            Ok(summary)
        }
        Err(e) => {
            error!("Export of {selection} to {} failed: {e}", out_dir.display());
            Err(e)
        }
    }
}
