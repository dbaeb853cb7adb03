//! Analyze module — per-file aggregation and the concurrent fan-out/fan-in run.

pub mod error;
pub mod file;
pub mod coordinator;

use std::path::PathBuf;
use serde::Serialize;

use crate::stats::Stats;

pub use error::AnalyzeError;
pub use file::aggregate_file;
pub use coordinator::{analyze_files, FileOutcome};

/// Tuning knobs for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Capacity of the result channel between file tasks and the merger
    pub channel_capacity: usize,
    /// Upper bound on files read at once (0 = one task per file, no cap)
    pub max_concurrent_files: usize,
    /// Count paths without their query string
    pub strip_query_strings: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            channel_capacity: 2,
            max_concurrent_files: 0,
            strip_query_strings: false,
        }
    }
}

/// A file that produced no statistics.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Final result of an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Files whose statistics were merged
    pub files_processed: usize,
    pub stats: Stats,
    pub failures: Vec<FileFailure>,
}
