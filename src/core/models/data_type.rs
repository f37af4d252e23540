//! Data type selector model

use std::fmt;
use std::str::FromStr;

/// Kind of SDG mapping data a snapshot is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Course catalogue mappings, stored as a folder of four files per year
    Course,
    /// Industry collaboration projects, stored as one summary file per year
    Industry,
    /// Thesis mappings, stored as one summary file per year and sub-period
    Thesis,
}

impl DataType {
    /// All data types in selector order
    pub const ALL: [Self; 3] = [Self::Course, Self::Industry, Self::Thesis];

    /// Stable ASCII identifier used on the command line and in export names
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Industry => "industry",
            Self::Thesis => "thesis",
        }
    }

    /// Display label, also embedded in summary file names
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Course => "課程",
            Self::Industry => "產學",
            Self::Thesis => "論文",
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "course" | "courses" | "課程" => Ok(Self::Course),
            "industry" | "產學" => Ok(Self::Industry),
            "thesis" | "theses" | "論文" => Ok(Self::Thesis),
            _ => Err(format!(
                "Unknown data type: '{s}' (expected course, industry or thesis)"
            )),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
