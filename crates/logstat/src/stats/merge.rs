//! Merge — combines per-file statistics into the final aggregate.

use super::model::Stats;

/// Combines per-file `Stats` in whatever order they arrive.
///
/// Every field is combined with a commutative operation. The response-time
/// average is the request-weighted mean over all files:
/// `Σ(avg_i × requests_i) / Σ(requests_i)`.
#[derive(Debug, Default)]
pub struct StatsMerger {
    merged: Stats,
    weighted_response_sum: f64,
    files: usize,
}

impl StatsMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stats: Stats) {
        // files without requests carry no weight
        if stats.total_requests > 0 {
            self.weighted_response_sum += stats.avg_response_ms * stats.total_requests as f64;
        }
        self.merged.merge_counts(stats);
        self.files += 1;
    }

    /// Number of per-file results merged so far.
    pub fn files(&self) -> usize {
        self.files
    }

    pub fn finish(mut self) -> Stats {
        self.merged.avg_response_ms = if self.merged.total_requests > 0 {
            self.weighted_response_sum / self.merged.total_requests as f64
        } else {
            0.0
        };
        self.merged
    }
}
