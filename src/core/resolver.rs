//! Source resolution: maps a selection onto concrete input paths
//!
//! Resolution only computes paths. Whether those paths exist is discovered by
//! the loaders when they open them.

use super::config::DataConfig;
use super::models::{DataType, Selection};
use std::path::{Path, PathBuf};

/// Per-unit counts file inside a course year folder
pub const COURSE_COUNTS_FILE: &str = "department_sdg_counts.json";
/// Per-unit percentages file inside a course year folder
pub const COURSE_PERCENTAGES_FILE: &str = "department_sdg_percentages.json";
/// Overall distribution file inside a course year folder
pub const COURSE_OVERALL_FILE: &str = "overall_sdg_distribution.json";
/// Climate-action distribution file inside a course year folder
pub const COURSE_TOPIC_FILE: &str = "specific_SDG13_distribution.json";

/// Project-local root used when no configured root exists
pub const DEFAULT_ROOT: &str = "data";
/// Sub-period suffix of thesis summary files unless configured otherwise
pub const DEFAULT_THESIS_SUFFIX: &str = "-1";

const SUMMARY_FILE_PREFIX: &str = "department_sdg_summary_";

/// The four files of a course year folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderLayout {
    /// `<root>/<year>`
    pub dir: PathBuf,
    /// Per-unit counts
    pub counts: PathBuf,
    /// Per-unit percentages
    pub percentages: PathBuf,
    /// Overall distribution
    pub overall: PathBuf,
    /// Climate-action distribution
    pub topic: PathBuf,
}

impl FolderLayout {
    fn in_dir(dir: PathBuf) -> Self {
        Self {
            counts: dir.join(COURSE_COUNTS_FILE),
            percentages: dir.join(COURSE_PERCENTAGES_FILE),
            overall: dir.join(COURSE_OVERALL_FILE),
            topic: dir.join(COURSE_TOPIC_FILE),
            dir,
        }
    }

    /// All four files in load order
    #[must_use]
    pub fn files(&self) -> [&Path; 4] {
        [&self.counts, &self.percentages, &self.overall, &self.topic]
    }
}

/// Expected on-disk layout for a selection; one variant per loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutDescriptor {
    /// Folder of four pre-shaped files (course data)
    Folder(FolderLayout),
    /// Single nested summary file (industry and thesis data)
    Summary {
        /// Summary file path
        path: PathBuf,
    },
}

impl LayoutDescriptor {
    /// Directory or file that identifies this layout in messages
    #[must_use]
    pub fn location(&self) -> &Path {
        match self {
            Self::Folder(folder) => &folder.dir,
            Self::Summary { path } => path,
        }
    }
}

/// Builds layout descriptors under an ordered list of candidate roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResolver {
    roots: Vec<PathBuf>,
    thesis_suffix: String,
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(DEFAULT_ROOT)], DEFAULT_THESIS_SUFFIX)
    }
}

impl SourceResolver {
    /// Create a resolver over `roots` in priority order
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, thesis_suffix: impl Into<String>) -> Self {
        Self {
            roots,
            thesis_suffix: thesis_suffix.into(),
        }
    }

    /// Build a resolver from the `[data]` config section
    ///
    /// No usable root falls back to the project-local `data` root. A missing
    /// thesis suffix means `-1`; an explicitly empty one means no suffix.
    #[must_use]
    pub fn from_config(data: &DataConfig) -> Self {
        let roots: Vec<PathBuf> = data
            .roots
            .iter()
            .filter(|root| !root.trim().is_empty())
            .map(PathBuf::from)
            .collect();
        let roots = if roots.is_empty() {
            vec![PathBuf::from(DEFAULT_ROOT)]
        } else {
            roots
        };
        let suffix = data
            .thesis_suffix
            .as_deref()
            .unwrap_or(DEFAULT_THESIS_SUFFIX);
        Self::new(roots, suffix)
    }

    /// Candidate roots in priority order
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Suffix appended to the year in thesis file names
    #[must_use]
    pub fn thesis_suffix(&self) -> &str {
        &self.thesis_suffix
    }

    /// First candidate root that is an existing directory, else the last
    /// candidate (the most general one)
    #[must_use]
    pub fn select_root(&self) -> PathBuf {
        self.roots
            .iter()
            .find(|root| root.is_dir())
            .or_else(|| self.roots.last())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
    }

    /// Resolve a selection against the selected root
    #[must_use]
    pub fn resolve(&self, selection: &Selection) -> LayoutDescriptor {
        self.resolve_in(&self.select_root(), selection)
    }

    /// Resolve a selection against an explicit root
    #[must_use]
    pub fn resolve_in(&self, root: &Path, selection: &Selection) -> LayoutDescriptor {
        let year = selection.year.as_str();
        match selection.data_type {
            DataType::Course => LayoutDescriptor::Folder(FolderLayout::in_dir(root.join(year))),
            DataType::Industry => LayoutDescriptor::Summary {
                path: root.join(summary_file_name(DataType::Industry, year, "")),
            },
            DataType::Thesis => LayoutDescriptor::Summary {
                path: root.join(summary_file_name(
                    DataType::Thesis,
                    year,
                    &self.thesis_suffix,
                )),
            },
        }
    }
}

/// `department_sdg_summary_<label><year><suffix>.json`
fn summary_file_name(data_type: DataType, year: &str, suffix: &str) -> String {
    format!(
        "{SUMMARY_FILE_PREFIX}{}{year}{suffix}.json",
        data_type.label()
    )
}
