//! Snapshot loading with sample-data fallback
//!
//! This is the single place that decides whether a selection is shown from
//! disk or from the built-in sample. Every fallback is logged with its cause.

use super::loader::{self, LoadError};
use super::models::{Selection, Snapshot};
use super::normalize::normalize;
use super::resolver::{LayoutDescriptor, SourceResolver};
use super::sample::sample_snapshot;
use crate::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Where a loaded snapshot came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// Read from the resolved directory or summary file
    Files(PathBuf),
    /// Substituted by the sample provider after a load failure
    Sample {
        /// The failure that triggered the substitution
        cause: LoadError,
    },
}

impl SnapshotSource {
    /// Whether the snapshot is sample data
    #[must_use]
    pub const fn is_sample(&self) -> bool {
        matches!(self, Self::Sample { .. })
    }
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Files(path) => write!(f, "{}", path.display()),
            Self::Sample { cause } => write!(f, "sample data ({cause})"),
        }
    }
}

/// A snapshot together with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSnapshot {
    /// Selection the snapshot was loaded for
    pub selection: Selection,
    /// Normalized tables
    pub snapshot: Snapshot,
    /// Files or sample
    pub source: SnapshotSource,
}

/// Resolve, read and normalize one selection without any fallback
///
/// # Errors
/// Returns the loader error, or [`LoadError::Invalid`] at the layout location
/// when the records cannot be normalized.
pub fn try_load(resolver: &SourceResolver, selection: &Selection) -> Result<Snapshot, LoadError> {
    let layout = resolver.resolve(selection);
    debug!("Resolved {selection} to {layout:?}");
    try_load_layout(&layout)
}

/// Read and normalize an already resolved layout
///
/// # Errors
/// Same as [`try_load`].
pub fn try_load_layout(layout: &LayoutDescriptor) -> Result<Snapshot, LoadError> {
    let raw = loader::load_raw(layout)?;
    normalize(&raw).map_err(|reason| LoadError::invalid(layout.location(), reason))
}

/// Load a selection, substituting the sample snapshot on any load failure
///
/// The selection is resolved once; the reported source is the location that
/// was read.
#[must_use]
pub fn load_or_sample(resolver: &SourceResolver, selection: &Selection) -> LoadedSnapshot {
    let layout = resolver.resolve(selection);
    debug!("Resolved {selection} to {layout:?}");

    match try_load_layout(&layout) {
        Ok(snapshot) => {
            let location = layout.location().to_path_buf();
            info!(
                "Loaded {selection} from {} ({} units)",
                location.display(),
                snapshot.counts.len()
            );
            LoadedSnapshot {
                selection: selection.clone(),
                snapshot,
                source: SnapshotSource::Files(location),
            }
        }
        Err(cause) => {
            warn!("Using sample data for {selection}: {cause}");
            LoadedSnapshot {
                selection: selection.clone(),
                snapshot: sample_snapshot(),
                source: SnapshotSource::Sample { cause },
            }
        }
    }
}

/// Blocking failures shown instead of any view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Both the unit table and the overall distribution are empty
    Empty {
        /// Selection that produced the empty snapshot
        selection: Selection,
    },
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { selection } => write!(
                f,
                "No data to display for {selection}: unit table and overall distribution are both empty"
            ),
        }
    }
}

impl Error for DashboardError {}

/// Reject snapshots that have nothing to render
///
/// An empty percentage table on its own is fine.
///
/// # Errors
/// Returns [`DashboardError::Empty`] when the snapshot is blank.
pub fn ensure_renderable(loaded: &LoadedSnapshot) -> Result<&Snapshot, DashboardError> {
    if loaded.snapshot.is_blank() {
        Err(DashboardError::Empty {
            selection: loaded.selection.clone(),
        })
    } else {
        Ok(&loaded.snapshot)
    }
}

/// Memo of loaded snapshots keyed by selection
///
/// Entries live until invalidated; loading the same selection twice returns
/// the cached snapshot without touching the filesystem.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: HashMap<Selection, LoadedSnapshot>,
}

impl SnapshotCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached snapshot for `selection`, loading it on first access
    pub fn get_or_load(
        &mut self,
        resolver: &SourceResolver,
        selection: &Selection,
    ) -> &LoadedSnapshot {
        if self.entries.contains_key(selection) {
            debug!("Snapshot cache hit for {selection}");
        }
        self.entries
            .entry(selection.clone())
            .or_insert_with(|| load_or_sample(resolver, selection))
    }

    /// Drop the entry for one selection; returns whether it was cached
    pub fn invalidate(&mut self, selection: &Selection) -> bool {
        self.entries.remove(selection).is_some()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached selections
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
