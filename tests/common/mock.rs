//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use smali_depgraph::domain::graph::DependencyGraph;
use smali_depgraph::domain::ports::{GraphWriter, SourceReader};

/// SourceReader that serves content from an in-memory map; unknown paths fail.
pub struct MockSourceReader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MockSourceReader {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.as_ref().to_path_buf(), content.into());
        self
    }
}

impl Default for MockSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReader for MockSourceReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))
    }
}

/// GraphWriter that records what it was given, or fails on demand.
pub struct RecordingWriter {
    pub written: Mutex<Vec<DependencyGraph>>,
    pub fail: bool,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

impl GraphWriter for RecordingWriter {
    fn write(&self, graph: &DependencyGraph) -> Result<()> {
        if self.fail {
            return Err(anyhow!("disk full"));
        }
        self.written.lock().unwrap().push(graph.clone());
        Ok(())
    }

    fn destination(&self) -> String {
        "memory".to_string()
    }
}
