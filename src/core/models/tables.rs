//! Normalized snapshot tables
//!
//! Every snapshot, whether read from disk or substituted by the sample
//! provider, is exposed through these four tables.

use super::sdg::{self, NONE_KEY};
use std::collections::BTreeMap;

/// Sum of counts, clamped at `u64::MAX` instead of overflowing
pub(crate) fn saturating_sum(counts: impl IntoIterator<Item = u64>) -> u64 {
    counts.into_iter().fold(0, u64::saturating_add)
}

/// One academic unit's mapping counts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitRecord {
    /// Department or unit name (row key)
    pub unit_name: String,
    /// Items with no SDG mapping; `None` when the source row has no `NONE` cell
    pub none_count: Option<u64>,
    /// Count per SDG code; codes absent from the source row are absent here
    pub sdg_counts: BTreeMap<String, u64>,
}

impl UnitRecord {
    /// Create an empty record for `unit_name`
    #[must_use]
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            ..Self::default()
        }
    }

    /// Count for `column` (an SDG code or `NONE`), missing cells read as 0
    #[must_use]
    pub fn count(&self, column: &str) -> u64 {
        if column == NONE_KEY {
            self.none_count.unwrap_or(0)
        } else {
            self.sdg_counts.get(column).copied().unwrap_or(0)
        }
    }

    /// Raw cell for `column`, `None` when the source row had no value
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<u64> {
        if column == NONE_KEY {
            self.none_count
        } else {
            self.sdg_counts.get(column).copied()
        }
    }
}

/// Per-unit counts table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountsTable {
    /// Count columns (SDG codes and `NONE`) in first-seen source order
    pub columns: Vec<String>,
    /// One row per unit, in source order
    pub rows: Vec<UnitRecord>,
}

impl CountsTable {
    /// Number of units
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no units
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// SDG columns in column order (excludes `NONE`)
    #[must_use]
    pub fn sdg_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|column| sdg::is_sdg_code(column))
            .collect()
    }

    /// SDG columns ordered by goal number
    #[must_use]
    pub fn sorted_sdg_columns(&self) -> Vec<&str> {
        let mut columns = self.sdg_columns();
        columns.sort_by_key(|column| sdg::goal_number(column));
        columns
    }

    /// Look up a unit by exact name
    #[must_use]
    pub fn unit(&self, unit_name: &str) -> Option<&UnitRecord> {
        self.rows.iter().find(|row| row.unit_name == unit_name)
    }

    /// Unit names sorted alphabetically, for selectors
    #[must_use]
    pub fn unit_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rows.iter().map(|row| row.unit_name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// One academic unit's mapping percentages
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitPercentage {
    /// Department or unit name (row key)
    pub unit_name: String,
    /// Share of unmapped items in percent
    pub none_pct: Option<f64>,
    /// Share per SDG code in percent (0-100)
    pub sdg_pcts: BTreeMap<String, f64>,
}

impl UnitPercentage {
    /// Raw cell for `column`, `None` when the source row had no value
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<f64> {
        if column == NONE_KEY {
            self.none_pct
        } else {
            self.sdg_pcts.get(column).copied()
        }
    }
}

/// Per-unit percentage table; empty for summary-file data types
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PercentageTable {
    /// Percentage columns in first-seen source order
    pub columns: Vec<String>,
    /// One row per unit, in source order
    pub rows: Vec<UnitPercentage>,
}

impl PercentageTable {
    /// Number of units
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// An empty table means percentages are unavailable, not an error
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of the overall distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdgCount {
    /// SDG code or `NONE`
    pub sdg: String,
    /// Total across all units
    pub count: u64,
}

/// Totals per SDG identifier across every unit of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverallDistribution {
    /// Entries in source order
    pub entries: Vec<SdgCount>,
}

impl OverallDistribution {
    /// Number of identifiers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the distribution has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry, `NONE` included
    #[must_use]
    pub fn total(&self) -> u64 {
        saturating_sum(self.entries.iter().map(|entry| entry.count))
    }

    /// Sum of every entry except `NONE`
    #[must_use]
    pub fn sdg_total(&self) -> u64 {
        saturating_sum(
            self.entries
                .iter()
                .filter(|entry| entry.sdg != NONE_KEY)
                .map(|entry| entry.count),
        )
    }

    /// Count of the `NONE` entry, 0 when absent
    #[must_use]
    pub fn none_count(&self) -> u64 {
        self.get(NONE_KEY).unwrap_or(0)
    }

    /// Count for one identifier
    #[must_use]
    pub fn get(&self, sdg: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.sdg == sdg)
            .map(|entry| entry.count)
    }
}

/// One row of the topic distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    /// Department or unit name
    pub unit_name: String,
    /// Items of that unit mapped to the topic SDG
    pub count: u64,
}

/// Per-unit counts for a single SDG (climate action)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicDistribution {
    /// Units in source order
    pub entries: Vec<TopicEntry>,
}

impl TopicDistribution {
    /// Number of listed units
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no unit is listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all listed counts
    #[must_use]
    pub fn total(&self) -> u64 {
        saturating_sum(self.entries.iter().map(|entry| entry.count))
    }
}
