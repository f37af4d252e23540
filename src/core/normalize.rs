//! Normalization of raw loader records into the uniform snapshot tables
//!
//! Source files name the same column differently depending on who produced
//! them (`次數` vs `count`, `提及課程數量` vs `單位名稱`). Every accepted
//! synonym is mapped onto one typed field here so nothing downstream has to
//! care.

use super::models::sdg::{self, NONE_KEY};
use super::models::{
    CountsTable, OverallDistribution, PercentageTable, RawRecord, RawSnapshot, SdgCount, Snapshot,
    TopicDistribution, TopicEntry, UnitPercentage, UnitRecord,
};
use crate::debug;
use serde_json::Value;

/// Unit-name column written by the dashboard's own exports
pub const UNIT_COLUMN: &str = "科系名稱";

/// Accepted unit-name columns in per-unit tables
pub const UNIT_COLUMN_SYNONYMS: [&str; 3] = [UNIT_COLUMN, "單位名稱", "unit_name"];

/// SDG identifier column of the overall distribution
pub const SDG_COLUMN: &str = "SDG";

/// Accepted count columns of the overall and topic distributions
pub const COUNT_COLUMN_SYNONYMS: [&str; 3] = ["次數", "count", "計數"];

/// Accepted unit-name columns of the topic distribution
pub const TOPIC_UNIT_SYNONYMS: [&str; 4] = ["提及課程數量", "單位名稱", UNIT_COLUMN, "unit_name"];

/// Normalize all four raw tables
///
/// # Errors
/// Returns a description of the first record that cannot be interpreted
/// (missing key column, non-numeric or negative count).
pub fn normalize(raw: &RawSnapshot) -> Result<Snapshot, String> {
    Ok(Snapshot {
        counts: normalize_counts(&raw.counts)?,
        percentages: normalize_percentages(&raw.percentages)?,
        overall: normalize_overall(&raw.overall)?,
        topic: normalize_topic(&raw.topic)?,
    })
}

/// Build the per-unit counts table
///
/// # Errors
/// Returns an error if a record has no unit name, repeats an earlier unit
/// name, or has an invalid count cell.
pub fn normalize_counts(records: &[RawRecord]) -> Result<CountsTable, String> {
    let mut table = CountsTable::default();

    for (index, record) in records.iter().enumerate() {
        let unit_name = find_unit_name(record, &UNIT_COLUMN_SYNONYMS)
            .ok_or_else(|| format!("counts record {index} has no unit name column"))?;
        if table.unit(unit_name).is_some() {
            return Err(format!("counts record {index} repeats unit '{unit_name}'"));
        }
        let mut row = UnitRecord::new(unit_name);

        for (key, value) in record {
            if UNIT_COLUMN_SYNONYMS.contains(&key.as_str()) {
                continue;
            }
            if !sdg::is_count_column(key) {
                debug!("Ignoring column '{key}' in counts record for {unit_name}");
                continue;
            }
            let Some(count) = parse_count(value)
                .map_err(|e| format!("counts record '{unit_name}', column {key}: {e}"))?
            else {
                continue;
            };
            if key == NONE_KEY {
                row.none_count = Some(count);
            } else {
                row.sdg_counts.insert(key.clone(), count);
            }
            remember_column(&mut table.columns, key);
        }

        table.rows.push(row);
    }

    Ok(table)
}

/// Build the per-unit percentage table
///
/// # Errors
/// Returns an error if a record has no unit name or a cell is not a number.
pub fn normalize_percentages(records: &[RawRecord]) -> Result<PercentageTable, String> {
    let mut table = PercentageTable::default();

    for (index, record) in records.iter().enumerate() {
        let unit_name = find_unit_name(record, &UNIT_COLUMN_SYNONYMS)
            .ok_or_else(|| format!("percentage record {index} has no unit name column"))?;
        let mut row = UnitPercentage {
            unit_name: unit_name.to_string(),
            ..UnitPercentage::default()
        };

        for (key, value) in record {
            if UNIT_COLUMN_SYNONYMS.contains(&key.as_str()) || !sdg::is_count_column(key) {
                continue;
            }
            let Some(pct) = parse_percentage(value)
                .map_err(|e| format!("percentage record '{unit_name}', column {key}: {e}"))?
            else {
                continue;
            };
            if key == NONE_KEY {
                row.none_pct = Some(pct);
            } else {
                row.sdg_pcts.insert(key.clone(), pct);
            }
            remember_column(&mut table.columns, key);
        }

        table.rows.push(row);
    }

    Ok(table)
}

/// Build the overall distribution
///
/// # Errors
/// Returns an error if a record lacks the `SDG` column or a count column.
pub fn normalize_overall(records: &[RawRecord]) -> Result<OverallDistribution, String> {
    let entries = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let sdg = record
                .get(SDG_COLUMN)
                .and_then(Value::as_str)
                .ok_or_else(|| format!("overall record {index} has no '{SDG_COLUMN}' column"))?;
            let count = synonym_count(record, &COUNT_COLUMN_SYNONYMS)
                .map_err(|e| format!("overall record '{sdg}': {e}"))?;
            Ok(SdgCount {
                sdg: sdg.to_string(),
                count,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(OverallDistribution { entries })
}

/// Build the topic distribution
///
/// Only units with a positive count are listed; zero rows are dropped.
///
/// # Errors
/// Returns an error if a record lacks a unit name or a count column.
pub fn normalize_topic(records: &[RawRecord]) -> Result<TopicDistribution, String> {
    let mut entries = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let unit_name = find_unit_name(record, &TOPIC_UNIT_SYNONYMS)
            .ok_or_else(|| format!("topic record {index} has no unit name column"))?;
        let count = synonym_count(record, &COUNT_COLUMN_SYNONYMS)
            .map_err(|e| format!("topic record '{unit_name}': {e}"))?;
        if count == 0 {
            debug!("Dropping zero-count topic record for {unit_name}");
            continue;
        }
        entries.push(TopicEntry {
            unit_name: unit_name.to_string(),
            count,
        });
    }

    Ok(TopicDistribution { entries })
}

/// Interpret a JSON cell as a non-negative integer count
///
/// `null` is a missing cell. Whole-valued floats (`12.0`) are accepted since
/// some exporters write every number as a float.
///
/// # Errors
/// Returns an error for strings, negatives and fractional values.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn parse_count(value: &Value) -> Result<Option<u64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => {
            if let Some(count) = number.as_u64() {
                return Ok(Some(count));
            }
            match number.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                    Ok(Some(f as u64))
                }
                _ => Err(format!("expected a non-negative whole number, found {number}")),
            }
        }
        other => Err(format!("expected a number, found {other}")),
    }
}

fn parse_percentage(value: &Value) -> Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("expected a number, found {number}")),
        other => Err(format!("expected a number, found {other}")),
    }
}

fn find_unit_name<'a>(record: &'a RawRecord, synonyms: &[&str]) -> Option<&'a str> {
    synonyms
        .iter()
        .find_map(|column| record.get(*column).and_then(Value::as_str))
}

fn synonym_count(record: &RawRecord, synonyms: &[&str]) -> Result<u64, String> {
    let value = synonyms
        .iter()
        .find_map(|column| record.get(*column))
        .ok_or_else(|| format!("no count column (expected one of {})", synonyms.join(", ")))?;
    Ok(parse_count(value)?.unwrap_or(0))
}

fn remember_column(columns: &mut Vec<String>, key: &str) {
    if !columns.iter().any(|column| column == key) {
        columns.push(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<RawRecord> {
        value
            .as_array()
            .expect("array")
            .iter()
            .map(|v| v.as_object().expect("object").clone())
            .collect()
    }

    #[test]
    fn counts_keep_rows_and_first_seen_columns() {
        let raw = records(json!([
            {"科系名稱": "中文系", "NONE": 30, "SDG4": 35, "SDG8": 9},
            {"科系名稱": "企業管理", "SDG9": 31, "SDG4": 49}
        ]));
        let table = normalize_counts(&raw).expect("normalize");

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns, vec!["NONE", "SDG4", "SDG8", "SDG9"]);
        assert_eq!(table.rows[0].none_count, Some(30));
        assert_eq!(table.rows[1].none_count, None);
        assert_eq!(table.rows[1].count("SDG9"), 31);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let raw = records(json!([{"unit_name": "X", "SDG14": 3, "備註": "n/a", "SDG1": 1}]));
        let table = normalize_counts(&raw).expect("normalize");
        assert_eq!(table.columns, vec!["SDG1"]);
        assert_eq!(table.rows[0].unit_name, "X");
    }

    #[test]
    fn counts_reject_text_cells() {
        let raw = records(json!([{"科系名稱": "X", "SDG1": "many"}]));
        assert!(normalize_counts(&raw).is_err());
    }

    #[test]
    fn counts_require_unit_name() {
        let raw = records(json!([{"SDG1": 1}]));
        let err = normalize_counts(&raw).expect_err("missing unit");
        assert!(err.contains("unit name"));
    }

    #[test]
    fn counts_reject_repeated_unit_names() {
        let raw = records(json!([
            {"科系名稱": "中文系", "SDG4": 1},
            {"單位名稱": "中文系", "SDG8": 2}
        ]));
        let err = normalize_counts(&raw).expect_err("duplicate unit");
        assert!(err.contains("repeats unit '中文系'"));
    }

    #[test]
    fn overall_accepts_either_count_synonym() {
        let raw = records(json!([
            {"SDG": "NONE", "次數": 2766},
            {"SDG": "SDG8", "count": 1383}
        ]));
        let overall = normalize_overall(&raw).expect("normalize");
        assert_eq!(overall.get("NONE"), Some(2766));
        assert_eq!(overall.get("SDG8"), Some(1383));
    }

    #[test]
    fn topic_accepts_unit_synonyms() {
        let raw = records(json!([
            {"提及課程數量": "通識教育與其他", "count": 5},
            {"單位名稱": "企業管理", "計數": 2}
        ]));
        let topic = normalize_topic(&raw).expect("normalize");
        assert_eq!(topic.entries[0].unit_name, "通識教育與其他");
        assert_eq!(topic.entries[1].count, 2);
        assert_eq!(topic.total(), 7);
    }

    #[test]
    fn topic_drops_zero_count_rows() {
        let raw = records(json!([
            {"提及課程數量": "資訊工程", "count": 2},
            {"提及課程數量": "中文系", "count": 0},
            {"提及課程數量": "歷史系", "count": null}
        ]));
        let topic = normalize_topic(&raw).expect("normalize");
        assert_eq!(topic.len(), 1);
        assert_eq!(topic.entries[0].unit_name, "資訊工程");
    }

    #[test]
    fn whole_floats_are_counts_but_fractions_are_not() {
        assert_eq!(parse_count(&json!(12.0)), Ok(Some(12)));
        assert_eq!(parse_count(&Value::Null), Ok(None));
        assert!(parse_count(&json!(1.5)).is_err());
        assert!(parse_count(&json!(-1)).is_err());
    }

    #[test]
    fn percentages_are_floats() {
        let raw = records(json!([{"科系名稱": "中文系", "NONE": 35.71, "SDG4": 41.67}]));
        let table = normalize_percentages(&raw).expect("normalize");
        assert_eq!(table.rows[0].cell("SDG4"), Some(41.67));
        assert_eq!(table.rows[0].none_pct, Some(35.71));
    }
}
