//! Generated-class detection by name markers.
//!
//! Tooling such as lambda desugaring, view binders and annotation processors
//! leaves recognizable fragments in the class names it synthesizes.

use crate::domain::class_name::simple_name;
use crate::domain::policy::GeneratedClassDetector;

/// Marker used when nothing else is configured: `Foo$$Lambda$1`, `Foo$$ViewBinder`.
pub const DEFAULT_GENERATED_MARKERS: &[&str] = &["$$"];

/// Treats a class as generated when its simple name contains any marker.
#[derive(Debug, Clone)]
pub struct MarkerDetector {
    markers: Vec<String>,
}

impl MarkerDetector {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty())
                .collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for MarkerDetector {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATED_MARKERS.iter().copied())
    }
}

impl GeneratedClassDetector for MarkerDetector {
    fn is_generated(&self, class_name: &str) -> bool {
        let name = simple_name(class_name);
        self.markers.iter().any(|marker| name.contains(marker.as_str()))
    }
}
