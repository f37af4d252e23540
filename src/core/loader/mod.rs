//! Format-specific readers for SDG mapping data
//!
//! Loaders produce a [`RawSnapshot`]; they never substitute sample data
//! themselves. That decision belongs to the caller (see
//! [`crate::core::dashboard`]).

pub mod folder;
pub mod summary;

use super::models::RawSnapshot;
use super::resolver::LayoutDescriptor;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Why a snapshot could not be read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The resolved file or directory does not exist
    NotFound {
        /// Missing path
        path: PathBuf,
    },
    /// The path exists but its content is unreadable or structurally invalid
    Invalid {
        /// Offending file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
}

impl LoadError {
    /// Classify an I/O failure on `path`
    #[must_use]
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Invalid {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
    }

    /// Classify a JSON parse failure on `path`
    #[must_use]
    pub fn from_json(path: &Path, err: &serde_json::Error) -> Self {
        Self::invalid(path, format!("invalid JSON: {err}"))
    }

    /// Content error on `path`
    #[must_use]
    pub fn invalid(path: &Path, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Whether this is the missing-path case
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Path the error refers to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Invalid { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "File or directory not found: {}", path.display()),
            Self::Invalid { path, reason } => {
                write!(f, "Failed to load {}: {reason}", path.display())
            }
        }
    }
}

impl Error for LoadError {}

/// Read the raw tables for a resolved layout, dispatching on its variant
///
/// # Errors
/// Returns [`LoadError::NotFound`] if an expected path is missing and
/// [`LoadError::Invalid`] for any other read or parse failure.
pub fn load_raw(layout: &LayoutDescriptor) -> Result<RawSnapshot, LoadError> {
    match layout {
        LayoutDescriptor::Folder(folder) => folder::load(folder),
        LayoutDescriptor::Summary { path } => summary::load(path),
    }
}

/// Read and parse one UTF-8 JSON file
///
/// A leading byte-order mark is tolerated since spreadsheet tools add one.
fn read_json(path: &Path) -> Result<serde_json::Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::from_io(path, &e))?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    serde_json::from_str(content).map_err(|e| LoadError::from_json(path, &e))
}
