//! Folder loader for course data
//!
//! A course year folder holds four files that are already shaped like the
//! dashboard tables, each a JSON array of flat objects.

use super::{read_json, LoadError};
use crate::core::models::{RawRecord, RawSnapshot};
use crate::core::resolver::FolderLayout;
use crate::debug;
use serde_json::Value;
use std::path::Path;

/// Read all four files of a course folder
///
/// The set is all-or-nothing: if any file is missing nothing is read.
///
/// # Errors
/// [`LoadError::NotFound`] for a missing folder or file, [`LoadError::Invalid`]
/// when a file is not an array of objects.
pub fn load(layout: &FolderLayout) -> Result<RawSnapshot, LoadError> {
    if !layout.dir.is_dir() {
        return Err(LoadError::NotFound {
            path: layout.dir.clone(),
        });
    }
    if let Some(missing) = layout.files().into_iter().find(|file| !file.is_file()) {
        return Err(LoadError::NotFound {
            path: missing.to_path_buf(),
        });
    }

    debug!("Reading course folder {}", layout.dir.display());

    Ok(RawSnapshot {
        counts: read_records(&layout.counts)?,
        percentages: read_records(&layout.percentages)?,
        overall: read_records(&layout.overall)?,
        topic: read_records(&layout.topic)?,
    })
}

/// Read one file as an array of flat JSON objects
fn read_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let Value::Array(items) = read_json(path)? else {
        return Err(LoadError::invalid(path, "expected a JSON array of records"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(LoadError::invalid(
                path,
                format!("record {index} is not an object: {other}"),
            )),
        })
        .collect()
}
