use crate::adapters::fs::reader::FileSourceReader;
use crate::adapters::generated::MarkerDetector;
use crate::app::dto::{AnalysisSummary, ScanStats};
use crate::domain::filter::Filter;
use crate::domain::graph::DependencyGraph;
use crate::domain::policy::{GeneratedClassDetector, UnsupportedFeature};
use crate::domain::ports::SourceReader;
use crate::domain::processor::{FileOutcome, FileProcessor};
use crate::domain::walker::collect_smali_files;
use crate::error::AnalysisError;
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

/// Shared flag checked between files; a cancelled run yields no graph.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub struct AnalyzerOptions {
    /// Report nested classes; otherwise the graph is collapsed to outer classes.
    pub processing_inner: bool,
    pub path_filter: Option<Box<dyn Filter>>,
    pub class_filter: Option<Box<dyn Filter>>,
    pub generated: Box<dyn GeneratedClassDetector>,
    pub unsupported_features: Vec<UnsupportedFeature>,
    /// Process files on the rayon pool. Results are identical either way.
    pub parallel: bool,
    pub cancel: CancellationToken,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            processing_inner: true,
            path_filter: None,
            class_filter: None,
            generated: Box::new(MarkerDetector::default()),
            unsupported_features: vec![UnsupportedFeature::instant_run()],
            parallel: false,
            cancel: CancellationToken::new(),
        }
    }
}

/// Result of one completed run.
#[derive(Debug, Clone)]
pub struct Analysis {
    root: PathBuf,
    raw: DependencyGraph,
    processing_inner: bool,
    stats: ScanStats,
}

impl Analysis {
    /// The graph as configured: raw, or without nested classes when inner
    /// processing is off.
    pub fn dependencies(&self) -> Cow<'_, DependencyGraph> {
        self.raw.project(!self.processing_inner)
    }

    pub fn raw_dependencies(&self) -> &DependencyGraph {
        &self.raw
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn summary(&self) -> AnalysisSummary {
        let graph = self.dependencies();
        AnalysisSummary {
            root: self.root.to_string_lossy().to_string(),
            processing_inner: self.processing_inner,
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            total_weight: graph.total_weight(),
            stats: self.stats.clone(),
        }
    }
}

/// Builds the class dependency graph of a disassembly tree.
pub struct DependencyAnalyzer {
    root: PathBuf,
    options: AnalyzerOptions,
    reader: Arc<dyn SourceReader>,
}

impl DependencyAnalyzer {
    pub fn new(root: impl Into<PathBuf>, options: AnalyzerOptions) -> Self {
        Self {
            root: root.into(),
            options,
            reader: Arc::new(FileSourceReader::new()),
        }
    }

    pub fn with_reader(mut self, reader: Arc<dyn SourceReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn run(&self) -> Result<Analysis, AnalysisError> {
        info!(root = %self.root.display(), "Analyzing dependencies...");

        if !self.root.exists() {
            error!(root = %self.root.display(), "Input root does not exist");
            return Err(AnalysisError::RootNotFound(self.root.clone()));
        }
        let root = std::fs::canonicalize(&self.root).map_err(|source| AnalysisError::Io {
            source,
            path: self.root.clone(),
        })?;
        self.check_preconditions(&root)?;

        let walk = collect_smali_files(&root, self.options.path_filter.as_deref());
        let processor =
            FileProcessor::new(&root, self.reader.as_ref(), self.options.generated.as_ref())
                .with_path_filter(self.options.path_filter.as_deref())
                .with_class_filter(self.options.class_filter.as_deref());
        let outcomes = self.process_files(&processor, &walk.files)?;

        let mut graph = DependencyGraph::new();
        let mut stats = ScanStats {
            files_seen: walk.files.len() + walk.filtered,
            filtered_by_path: walk.filtered,
            walk_errors: walk.errors,
            ..ScanStats::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Processed(report) => {
                    stats.files_processed += 1;
                    stats.failed_lines += report.failed_lines;
                    if report.counts.is_empty() {
                        stats.files_without_dependencies += 1;
                    } else {
                        graph.merge(report.class_name, report.counts);
                    }
                }
                FileOutcome::Filtered(_) => stats.filtered_by_class += 1,
                FileOutcome::Failed => stats.files_failed += 1,
            }
        }

        info!(
            classes = graph.vertex_count(),
            edges = graph.edge_count(),
            "{stats}"
        );
        Ok(Analysis {
            root,
            raw: graph,
            processing_inner: self.options.processing_inner,
            stats,
        })
    }

    fn check_preconditions(&self, root: &Path) -> Result<(), AnalysisError> {
        for feature in &self.options.unsupported_features {
            if let Some(path) = feature.detect(root) {
                error!(
                    feature = %feature.name,
                    marker = %path.display(),
                    "Unsupported build feature detected; disable it and rebuild the app"
                );
                return Err(AnalysisError::UnsupportedFeature {
                    marker: feature.name.clone(),
                    path,
                });
            }
        }
        Ok(())
    }

    fn process_files(
        &self,
        processor: &FileProcessor<'_>,
        files: &[PathBuf],
    ) -> Result<Vec<FileOutcome>, AnalysisError> {
        let cancel = &self.options.cancel;
        let process = |path: &PathBuf| {
            if cancel.is_cancelled() {
                None
            } else {
                Some(processor.process(path))
            }
        };

        let outcomes: Option<Vec<FileOutcome>> = if self.options.parallel {
            files.par_iter().map(process).collect()
        } else {
            files.iter().map(process).collect()
        };
        match outcomes {
            Some(outcomes) if !cancel.is_cancelled() => Ok(outcomes),
            _ => {
                info!("Analysis cancelled");
                Err(AnalysisError::Cancelled)
            }
        }
    }
}
