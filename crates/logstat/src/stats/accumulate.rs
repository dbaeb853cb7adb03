//! Accumulate — per-file running statistics.

use crate::parser::{strip_query, RequestRecord};

use super::model::{bump, Stats};

/// Running state for a single file.
///
/// Owned by exactly one file task; `finish` produces the `Stats` that gets
/// published to the merge stage.
#[derive(Debug, Default)]
pub struct Accumulator {
    stats: Stats,
    response_sum: u64,
    strip_query: bool,
}

impl Accumulator {
    pub fn new(strip_query: bool) -> Self {
        Self {
            strip_query,
            ..Self::default()
        }
    }

    /// Fold one parsed request into the running stats.
    pub fn record(&mut self, record: RequestRecord) {
        let stats = &mut self.stats;
        stats.total_requests += 1;

        bump(&mut stats.by_method, record.method);
        bump(&mut stats.by_status, record.status);

        let path = if self.strip_query {
            strip_query(&record.path).to_string()
        } else {
            record.path
        };
        bump(&mut stats.by_path, path);

        if !record.client_ip.is_empty() {
            bump(&mut stats.by_ip, record.client_ip);
        }
        if !record.user_agent.is_empty() {
            bump(&mut stats.by_user_agent, record.user_agent);
        }

        self.response_sum = self.response_sum.saturating_add(record.response_ms);
        stats.max_response_ms = stats.max_response_ms.max(record.response_ms);
        stats.total_bytes = stats.total_bytes.saturating_add(record.bytes_sent);
    }

    /// Count a line that no parser accepted.
    pub fn skip(&mut self) {
        self.stats.skipped_lines += 1;
    }

    pub fn total_requests(&self) -> u64 {
        self.stats.total_requests
    }

    pub fn finish(mut self) -> Stats {
        if self.stats.total_requests > 0 {
            self.stats.avg_response_ms =
                self.response_sum as f64 / self.stats.total_requests as f64;
        }
        self.stats
    }
}
