//! Snapshot and selection models

use super::tables::{CountsTable, OverallDistribution, PercentageTable, TopicDistribution};
use super::DataType;
use serde_json::{Map, Value};
use std::fmt;

/// One flat JSON object as found in the source files
pub type RawRecord = Map<String, Value>;

/// User selection that identifies one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Which data shape to load
    pub data_type: DataType,
    /// Academic year label, e.g. `"112"`
    pub year: String,
}

impl Selection {
    /// Create a selection
    #[must_use]
    pub fn new(data_type: DataType, year: impl Into<String>) -> Self {
        Self {
            data_type,
            year: year.into(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.data_type, self.year)
    }
}

/// Loader output before normalization: four arrays of flat records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSnapshot {
    /// Per-unit count records
    pub counts: Vec<RawRecord>,
    /// Per-unit percentage records (empty for summary files)
    pub percentages: Vec<RawRecord>,
    /// Overall distribution records
    pub overall: Vec<RawRecord>,
    /// Climate-action topic records
    pub topic: Vec<RawRecord>,
}

/// Four normalized tables for one selection
///
/// Tables are never mutated after normalization; a new selection builds a
/// new snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// Per-unit counts
    pub counts: CountsTable,
    /// Per-unit percentages (may be empty)
    pub percentages: PercentageTable,
    /// Totals per SDG identifier
    pub overall: OverallDistribution,
    /// Climate-action counts per unit
    pub topic: TopicDistribution,
}

impl Snapshot {
    /// Nothing can be rendered when both the unit table and overall
    /// distribution are empty
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.counts.is_empty() && self.overall.is_empty()
    }
}
