use crate::domain::graph::DependencyGraph;
use anyhow::Result;
use std::path::Path;
use tracing::error;

/// Source reader port (implemented by Infrastructure)
pub trait SourceReader: Send + Sync {
    /// Raw bytes of a disassembly file; lines are decoded individually.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Sink for a finished dependency graph.
pub trait GraphWriter {
    fn write(&self, graph: &DependencyGraph) -> Result<()>;

    /// Human-readable destination, used in diagnostics.
    fn destination(&self) -> String;

    /// Writes the graph, logging a failure instead of returning it.
    fn export(&self, graph: &DependencyGraph) -> bool {
        match self.write(graph) {
            Ok(()) => true,
            Err(e) => {
                error!(destination = %self.destination(), "Cannot write graph: {e:#}");
                false
            }
        }
    }
}

/// Turns a packaged application into a tree of smali files.
pub trait ArchiveDecoder {
    fn decode(&self, archive: &Path, out_dir: &Path, api_level: u32) -> Result<()>;
}
