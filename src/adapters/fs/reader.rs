use crate::domain::ports::SourceReader;
use anyhow::{Context, Result};
use std::path::Path;

/// File system source reader implementation
pub struct FileSourceReader;

impl FileSourceReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReader for FileSourceReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).with_context(|| format!("Failed to read smali file: {}", path.display()))
    }
}
