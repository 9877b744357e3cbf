//! Per-file dependency extraction.
//!
//! A file is keyed by its canonical class name, with anonymous classes folded
//! into their nearest named outer class. Each line is scanned for type
//! references; the survivors of the filter pipeline are counted once per line.

use crate::domain::class_name::{
    ClassName, canonical_name, is_anonymous, is_inner, nearest_named_outer, outer_of,
};
use crate::domain::descriptor::{RawReference, extract_references};
use crate::domain::filter::{Filter, passes};
use crate::domain::graph::DependencyCounts;
use crate::domain::policy::GeneratedClassDetector;
use crate::domain::ports::SourceReader;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub class_name: ClassName,
    pub counts: DependencyCounts,
    /// Lines skipped because they could not be decoded.
    pub failed_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Processed(FileReport),
    /// Rejected by the class filter before being read.
    Filtered(ClassName),
    /// Unreadable, or not a class file under the root. Already logged.
    Failed,
}

pub struct FileProcessor<'a> {
    root: &'a Path,
    reader: &'a dyn SourceReader,
    path_filter: Option<&'a dyn Filter>,
    class_filter: Option<&'a dyn Filter>,
    generated: &'a dyn GeneratedClassDetector,
}

impl<'a> FileProcessor<'a> {
    pub fn new(
        root: &'a Path,
        reader: &'a dyn SourceReader,
        generated: &'a dyn GeneratedClassDetector,
    ) -> Self {
        Self {
            root,
            reader,
            path_filter: None,
            class_filter: None,
            generated,
        }
    }

    pub fn with_path_filter(mut self, filter: Option<&'a dyn Filter>) -> Self {
        self.path_filter = filter;
        self
    }

    pub fn with_class_filter(mut self, filter: Option<&'a dyn Filter>) -> Self {
        self.class_filter = filter;
        self
    }

    pub fn process(&self, path: &Path) -> FileOutcome {
        let literal = match canonical_name(path, self.root) {
            Ok(name) => name,
            Err(e) => {
                warn!(path = %path.display(), "Cannot derive class name: {e}");
                return FileOutcome::Failed;
            }
        };
        let this_class = nearest_named_outer(&literal).to_string();

        if !passes(self.class_filter, &this_class) {
            debug!(class = %this_class, "Skipped by class filter");
            return FileOutcome::Filtered(this_class);
        }

        let content = match self.reader.read(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), "Cannot read file: {e:#}");
                return FileOutcome::Failed;
            }
        };

        let mut counts = DependencyCounts::new();
        let mut failed_lines = 0;
        for (index, raw_line) in content.split(|&b| b == b'\n').enumerate() {
            let line = match std::str::from_utf8(raw_line) {
                Ok(line) => line,
                Err(e) => {
                    warn!(path = %path.display(), line = index + 1, "Skipping line: {e}");
                    failed_lines += 1;
                    continue;
                }
            };
            for reference in extract_references(line) {
                if let Some(dependency) = self.accept(&reference, &this_class, &literal) {
                    *counts.entry(dependency).or_insert(0) += 1;
                }
            }
        }

        // a nested class always depends on its enclosing class
        if is_inner(&this_class) {
            *counts.entry(outer_of(&this_class).to_string()).or_insert(0) += 1;
        }

        FileOutcome::Processed(FileReport {
            class_name: this_class,
            counts,
            failed_lines,
        })
    }

    fn accept(&self, reference: &RawReference, this_class: &str, literal: &str) -> Option<ClassName> {
        if !passes(self.path_filter, reference.as_path()) {
            return None;
        }
        let name = reference.class_name();
        if name.is_empty() || !passes(self.class_filter, &name) {
            return None;
        }
        if !self.is_class_ok(&name, this_class) || name == literal {
            return None;
        }
        Some(name)
    }

    /// Anonymous classes belong to their outer class, generated classes are
    /// noise, and a class never depends on itself.
    fn is_class_ok(&self, name: &str, this_class: &str) -> bool {
        !is_anonymous(name) && !self.generated.is_generated(name) && name != this_class
    }
}
