//! Recursive discovery of smali files under the disassembly root.

use crate::domain::class_name::is_smali_file_name;
use crate::domain::filter::{Filter, passes};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct WalkResult {
    /// Eligible files in traversal order.
    pub files: Vec<PathBuf>,
    /// Smali files rejected by the path filter.
    pub filtered: usize,
    /// Entries that could not be visited.
    pub errors: usize,
}

/// Collects every `*.smali` file below `root` that passes `path_filter`.
///
/// Directories are descended into; symlinks and other entries are ignored.
/// Entries are visited in file-name order so runs are reproducible.
pub fn collect_smali_files(root: &Path, path_filter: Option<&dyn Filter>) -> WalkResult {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    let mut result = WalkResult::default();
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = ?e.path(), "Cannot visit entry: {e}");
                result.errors += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if !is_smali_file_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let path = entry.into_path();
        if passes(path_filter, &path.to_string_lossy()) {
            result.files.push(path);
        } else {
            debug!(path = %path.display(), "Skipped by path filter");
            result.filtered += 1;
        }
    }
    result
}
