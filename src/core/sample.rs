//! Built-in sample dataset
//!
//! Substituted whenever a selection cannot be loaded from disk so that the
//! dashboard always has something to show. The data is raw loader output and
//! goes through the same normalizer as real files.

use super::models::{RawRecord, RawSnapshot, Snapshot};
use super::normalize::normalize;
use serde_json::{json, Value};

/// Raw sample tables: two departments with partial SDG coverage
#[must_use]
pub fn sample_raw() -> RawSnapshot {
    RawSnapshot {
        counts: records(&json!([
            {"科系名稱": "中文系", "NONE": 30, "SDG1": 0, "SDG10": 1, "SDG11": 1, "SDG12": 1,
             "SDG13": 0, "SDG15": 0, "SDG16": 3, "SDG17": 0, "SDG2": 0, "SDG3": 4, "SDG4": 35,
             "SDG5": 0, "SDG6": 0, "SDG7": 0, "SDG8": 9, "SDG9": 0},
            {"科系名稱": "企業管理", "NONE": 195, "SDG1": 0, "SDG10": 0, "SDG11": 0, "SDG12": 15,
             "SDG13": 2, "SDG15": 2, "SDG16": 5, "SDG17": 0, "SDG2": 0, "SDG3": 15, "SDG4": 49,
             "SDG5": 0, "SDG6": 0, "SDG7": 2, "SDG8": 183, "SDG9": 31}
        ])),
        percentages: records(&json!([
            {"科系名稱": "中文系", "NONE": 35.71, "SDG4": 41.67, "SDG8": 10.71, "SDG3": 4.76,
             "SDG16": 3.57},
            {"科系名稱": "企業管理", "NONE": 39.08, "SDG8": 36.67, "SDG4": 9.82, "SDG9": 6.21,
             "SDG3": 3.01}
        ])),
        overall: records(&json!([
            {"SDG": "NONE", "次數": 2766},
            {"SDG": "SDG8", "次數": 1383},
            {"SDG": "SDG4", "次數": 801}
        ])),
        topic: records(&json!([
            {"提及課程數量": "通識教育與其他", "count": 5},
            {"提及課程數量": "企業管理", "count": 2}
        ])),
    }
}

/// Normalized sample snapshot; identical on every call
///
/// # Panics
/// Panics if the built-in sample data fails normalization, which would be a
/// defect in this module rather than a runtime condition.
#[must_use]
pub fn sample_snapshot() -> Snapshot {
    normalize(&sample_raw()).expect("built-in sample data must normalize")
}

fn records(value: &Value) -> Vec<RawRecord> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_object).cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics;

    #[test]
    fn sample_has_two_units() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.counts.len(), 2);
        assert_eq!(snapshot.percentages.len(), 2);
        assert_eq!(snapshot.overall.len(), 3);
        assert_eq!(snapshot.topic.len(), 2);
    }

    #[test]
    fn sample_is_deterministic() {
        assert_eq!(sample_snapshot(), sample_snapshot());
    }

    #[test]
    fn sample_unit_matches_known_values() {
        let snapshot = sample_snapshot();
        let chinese = snapshot.counts.unit("中文系").expect("unit present");
        assert_eq!(chinese.count("SDG4"), 35);
        assert_eq!(chinese.count("SDG8"), 9);
        assert_eq!(chinese.none_count, Some(30));
        assert_eq!(metrics::unit_total(chinese), 84);
        assert_eq!(metrics::unit_sdg_total(chinese), 54);
        assert_eq!(metrics::unit_diversity(chinese), 7);
    }
}
