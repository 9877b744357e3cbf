use std::path::{Path, PathBuf};

/// Decides whether a class was synthesized by a compiler or build tool.
/// Generated classes never appear as dependencies.
pub trait GeneratedClassDetector: Send + Sync {
    fn is_generated(&self, class_name: &str) -> bool;
}

/// Detector that treats no class as generated.
pub struct NoGeneratedClasses;

impl GeneratedClassDetector for NoGeneratedClasses {
    fn is_generated(&self, _class_name: &str) -> bool {
        false
    }
}

/// A file whose presence under the disassembly root means the archive was
/// built with a feature the analysis cannot handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedFeature {
    pub name: String,
    /// Root-relative location of the marker file.
    pub marker: PathBuf,
}

impl UnsupportedFeature {
    pub fn new(name: impl Into<String>, marker: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            marker: marker.into(),
        }
    }

    /// Instant Run leaves its payload at `unknown/instant-run.zip`.
    pub fn instant_run() -> Self {
        Self::new("Instant Run", Path::new("unknown").join("instant-run.zip"))
    }

    pub fn detect(&self, root: &Path) -> Option<PathBuf> {
        let path = root.join(&self.marker);
        path.exists().then_some(path)
    }
}
