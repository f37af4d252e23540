//! Data models for `sdg-dashboard`

pub mod data_type;
pub mod sdg;
pub mod snapshot;
pub mod tables;

pub use data_type::DataType;
pub use snapshot::{RawRecord, RawSnapshot, Selection, Snapshot};
pub use tables::{
    CountsTable, OverallDistribution, PercentageTable, SdgCount, TopicDistribution, TopicEntry,
    UnitPercentage, UnitRecord,
};
