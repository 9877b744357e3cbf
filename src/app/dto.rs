use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-run traversal counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Smali files found under the root, before any filtering.
    pub files_seen: usize,
    pub files_processed: usize,
    pub files_without_dependencies: usize,
    pub filtered_by_path: usize,
    pub filtered_by_class: usize,
    pub files_failed: usize,
    pub failed_lines: usize,
    pub walk_errors: usize,
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} smali files (processed: {}, no dependencies: {}, path-filtered: {}, class-filtered: {}, failed: {})",
            self.files_seen,
            self.files_processed,
            self.files_without_dependencies,
            self.filtered_by_path,
            self.filtered_by_class,
            self.files_failed
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub root: String,
    pub processing_inner: bool,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub total_weight: u64,
    pub stats: ScanStats,
}
