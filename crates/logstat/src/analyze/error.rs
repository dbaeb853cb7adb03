use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File-level failures. Each one costs the analysis a single file; sibling
/// files are unaffected.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Processing task for {} failed: {}", .path.display(), .message)]
    TaskFailed {
        path: PathBuf,
        message: String,
    },
}

impl AnalyzeError {
    pub fn path(&self) -> &Path {
        match self {
            AnalyzeError::Open { path, .. }
            | AnalyzeError::Read { path, .. }
            | AnalyzeError::TaskFailed { path, .. } => path,
        }
    }
}
