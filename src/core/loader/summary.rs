//! Summary loader for industry and thesis data
//!
//! A summary file is one object mapping unit name to an object of
//! `SDG code -> count` (optionally with `NONE`). The per-unit, overall and
//! climate-action tables are all derived from it; percentages are not part of
//! the format.

use super::{read_json, LoadError};
use crate::core::models::sdg::{self, CLIMATE_ACTION};
use crate::core::models::{RawRecord, RawSnapshot};
use crate::core::normalize::{parse_count, SDG_COLUMN, UNIT_COLUMN};
use crate::debug;
use serde_json::{Map, Value};
use std::path::Path;

/// Count column written into derived overall and topic records
const DERIVED_COUNT_COLUMN: &str = "count";
/// Unit column written into derived topic records
const DERIVED_TOPIC_UNIT_COLUMN: &str = "單位名稱";

/// Read a summary file and derive the four raw tables
///
/// # Errors
/// [`LoadError::NotFound`] when the file is missing, [`LoadError::Invalid`]
/// when it is not an object of objects or holds a non-numeric count.
pub fn load(path: &Path) -> Result<RawSnapshot, LoadError> {
    let Value::Object(units) = read_json(path)? else {
        return Err(LoadError::invalid(
            path,
            "expected an object mapping unit names to SDG counts",
        ));
    };

    debug!("Deriving tables from {} units in {}", units.len(), path.display());

    let mut counts = Vec::with_capacity(units.len());
    let mut totals: Vec<(String, u64)> = Vec::new();
    let mut topic = Vec::new();

    for (unit_name, sdgs) in units {
        let Value::Object(sdgs) = sdgs else {
            return Err(LoadError::invalid(
                path,
                format!("unit '{unit_name}' does not map to an object of counts"),
            ));
        };

        for (key, value) in &sdgs {
            if !sdg::is_count_column(key) {
                continue;
            }
            let count = parse_count(value)
                .map_err(|e| LoadError::invalid(path, format!("unit '{unit_name}', {key}: {e}")))?
                .unwrap_or(0);
            add_to_total(&mut totals, key, count).ok_or_else(|| {
                LoadError::invalid(
                    path,
                    format!("count overflow in {key} total at unit '{unit_name}'"),
                )
            })?;

            if key == CLIMATE_ACTION && count > 0 {
                topic.push(topic_record(&unit_name, count));
            }
        }

        let mut record = RawRecord::new();
        record.insert(UNIT_COLUMN.to_string(), Value::String(unit_name));
        record.extend(sdgs);
        counts.push(record);
    }

    let overall = totals
        .into_iter()
        .map(|(sdg, count)| {
            let mut record = Map::new();
            record.insert(SDG_COLUMN.to_string(), Value::String(sdg));
            record.insert(DERIVED_COUNT_COLUMN.to_string(), Value::from(count));
            record
        })
        .collect();

    Ok(RawSnapshot {
        counts,
        percentages: Vec::new(),
        overall,
        topic,
    })
}

/// Accumulate `count` under `key`, keeping first-seen key order
///
/// Returns `None` when the running total would overflow.
fn add_to_total(totals: &mut Vec<(String, u64)>, key: &str, count: u64) -> Option<()> {
    if let Some((_, total)) = totals.iter_mut().find(|(existing, _)| existing == key) {
        *total = total.checked_add(count)?;
    } else {
        totals.push((key.to_string(), count));
    }
    Some(())
}

fn topic_record(unit_name: &str, count: u64) -> RawRecord {
    let mut record = Map::new();
    record.insert(
        DERIVED_TOPIC_UNIT_COLUMN.to_string(),
        Value::String(unit_name.to_string()),
    );
    record.insert(DERIVED_COUNT_COLUMN.to_string(), Value::from(count));
    record
}
