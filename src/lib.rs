//! smali-depgraph library: class dependency graphs from disassembled Android bytecode.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;

pub use app::config::FilterConfig;
pub use app::engine::{Analysis, AnalyzerOptions, CancellationToken, DependencyAnalyzer};
pub use domain::graph::{DependencyCounts, DependencyGraph};
pub use error::AnalysisError;
