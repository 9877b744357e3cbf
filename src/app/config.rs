//! Filter configuration, read from a JSON file such as:
//!
//! ```json
//! {
//!   "package-name": "com.example.app",
//!   "show-inners": false,
//!   "ignored-classes": [".*Dagger.*", ".*\\.R(\\$.*)?"]
//! }
//! ```

use crate::adapters::generated::{DEFAULT_GENERATED_MARKERS, MarkerDetector};
use crate::app::engine::AnalyzerOptions;
use crate::domain::filter::{AndFilter, Filter, InverseRegexFilter, RegexFilter};
use crate::domain::policy::UnsupportedFeature;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FilterConfig {
    /// Only files and references inside this package are analyzed.
    pub package_name: Option<String>,
    /// Keep nested classes in the reported graph.
    pub show_inners: bool,
    /// Regexes; matching class names are excluded.
    pub ignored_classes: Vec<String>,
    /// Simple-name fragments marking generated classes. Defaults to `$$`.
    pub generated_markers: Option<Vec<String>>,
    /// Root-relative marker files that abort the analysis. Defaults to the
    /// Instant Run payload.
    pub unsupported_markers: Option<Vec<String>>,
}

impl FilterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse filter config: {}", path.display()))
    }

    /// `.*com/example/app.*`, accepting either path separator.
    pub fn path_filter(&self) -> Result<Option<Box<dyn Filter>>> {
        let Some(package) = self.package_name.as_deref().map(str::trim) else {
            return Ok(None);
        };
        let segments: Vec<String> = package
            .split('.')
            .filter(|s| !s.is_empty())
            .map(regex::escape)
            .collect();
        if segments.is_empty() {
            return Ok(None);
        }
        let pattern = format!(".*{}.*", segments.join(r"[/\\]"));
        Ok(Some(Box::new(RegexFilter::new(&pattern)?)))
    }

    pub fn class_filter(&self) -> Result<Option<Box<dyn Filter>>> {
        if self.ignored_classes.is_empty() {
            return Ok(None);
        }
        let filters = self
            .ignored_classes
            .iter()
            .map(|pattern| {
                InverseRegexFilter::new(pattern).map(|f| Box::new(f) as Box<dyn Filter>)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Box::new(AndFilter::new(filters))))
    }

    pub fn generated_detector(&self) -> MarkerDetector {
        match &self.generated_markers {
            Some(markers) => MarkerDetector::new(markers.iter().cloned()),
            None => MarkerDetector::new(DEFAULT_GENERATED_MARKERS.iter().copied()),
        }
    }

    pub fn unsupported_features(&self) -> Vec<UnsupportedFeature> {
        match &self.unsupported_markers {
            Some(markers) => markers
                .iter()
                .map(|m| UnsupportedFeature::new(m.clone(), m))
                .collect(),
            None => vec![UnsupportedFeature::instant_run()],
        }
    }

    pub fn to_options(&self) -> Result<AnalyzerOptions> {
        Ok(AnalyzerOptions {
            processing_inner: self.show_inners,
            path_filter: self.path_filter()?,
            class_filter: self.class_filter()?,
            generated: Box::new(self.generated_detector()),
            unsupported_features: self.unsupported_features(),
            ..AnalyzerOptions::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::passes;
    use crate::domain::policy::GeneratedClassDetector;

    #[test]
    fn test_parses_kebab_case_keys() {
        let config: FilterConfig = serde_json::from_str(
            r#"{"package-name": "com.example", "show-inners": true, "ignored-classes": [".*Dagger.*"]}"#,
        )
        .unwrap();
        assert_eq!(config.package_name.as_deref(), Some("com.example"));
        assert!(config.show_inners);
        assert_eq!(config.ignored_classes, vec![".*Dagger.*"]);
        assert_eq!(config.generated_markers, None);
    }

    #[test]
    fn test_empty_config_has_no_filters() {
        let config: FilterConfig = serde_json::from_str("{}").unwrap();
        assert!(config.path_filter().unwrap().is_none());
        assert!(config.class_filter().unwrap().is_none());
        assert!(!config.show_inners);
    }

    #[test]
    fn test_package_path_filter() {
        let config = FilterConfig {
            package_name: Some("com.example".into()),
            ..Default::default()
        };
        let filter = config.path_filter().unwrap().unwrap();
        assert!(filter.accepts("/tmp/out/smali/com/example/Main.smali"));
        assert!(filter.accepts("com/example/Main"));
        assert!(filter.accepts(r"C:\out\smali\com\example\Main.smali"));
        assert!(!filter.accepts("org/other/Main"));
        assert!(!filter.accepts("comXexample/Main"));
    }

    #[test]
    fn test_blank_package_means_no_filter() {
        let config = FilterConfig {
            package_name: Some("  ".into()),
            ..Default::default()
        };
        assert!(config.path_filter().unwrap().is_none());
    }

    #[test]
    fn test_ignored_classes_filter() {
        let config = FilterConfig {
            ignored_classes: vec![".*Dagger.*".into(), r".*\.BuildConfig".into()],
            ..Default::default()
        };
        let filter = config.class_filter().unwrap();
        assert!(!passes(filter.as_deref(), "com.a.DaggerAppComponent"));
        assert!(!passes(filter.as_deref(), "com.a.BuildConfig"));
        assert!(passes(filter.as_deref(), "com.a.Main"));
    }

    #[test]
    fn test_invalid_ignored_pattern() {
        let config = FilterConfig {
            ignored_classes: vec!["[".into()],
            ..Default::default()
        };
        assert!(config.class_filter().is_err());
        assert!(config.to_options().is_err());
    }

    #[test]
    fn test_markers() {
        let config = FilterConfig {
            generated_markers: Some(vec!["_Factory".into()]),
            unsupported_markers: Some(vec!["build/marker".into()]),
            ..Default::default()
        };
        assert!(config.generated_detector().is_generated("a.Repo_Factory"));
        assert!(!config.generated_detector().is_generated("a.Repo$$Lambda"));
        assert_eq!(
            config.unsupported_features(),
            vec![UnsupportedFeature::new("build/marker", "build/marker")]
        );
        assert_eq!(
            FilterConfig::default().unsupported_features(),
            vec![UnsupportedFeature::instant_run()]
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");
        std::fs::write(&path, r#"{"show-inners": true}"#).unwrap();
        assert!(FilterConfig::load(&path).unwrap().show_inners);
        assert!(FilterConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
