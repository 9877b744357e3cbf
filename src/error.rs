use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a whole analysis run. Nothing else does: per-file and
/// per-line failures are logged and skipped.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0} does not exist")]
    RootNotFound(PathBuf),

    #[error(
        "unsupported build feature detected ({marker} found at {path}); disable it and rebuild the app"
    )]
    UnsupportedFeature { marker: String, path: PathBuf },

    #[error("analysis cancelled")]
    Cancelled,

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Failure to derive a class name from a file path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassNameError {
    #[error("{path} is not located under {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("{0} is not a smali file")]
    NotSmali(PathBuf),

    #[error("{0} is not valid UTF-8")]
    NonUtf8(PathBuf),

    #[error("{0} yields an empty class name")]
    Empty(PathBuf),
}
