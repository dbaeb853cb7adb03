//! Model — the traffic statistics record shared by per-file and final results.

use std::collections::HashMap;
use std::hash::Hash;
use serde::{Deserialize, Serialize};

/// Aggregate traffic statistics for one file, or for all files combined.
///
/// Counts only ever grow while a file is being read. Once a value is handed
/// to the merge stage it is treated as read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Lines that parsed successfully
    pub total_requests: u64,
    pub by_method: HashMap<String, u64>,
    pub by_status: HashMap<u32, u64>,
    pub by_path: HashMap<String, u64>,
    /// Only lines with a client address are counted here
    pub by_ip: HashMap<String, u64>,
    /// Only lines with a user agent are counted here
    pub by_user_agent: HashMap<String, u64>,
    pub avg_response_ms: f64,
    pub max_response_ms: u64,
    pub total_bytes: u64,
    /// Lines read but rejected by every parser
    pub skipped_lines: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the additive fields of `other` into `self`.
    ///
    /// Counts, totals and the maximum are combined; `avg_response_ms` is left
    /// alone because it needs the request weights (see `StatsMerger`).
    pub fn merge_counts(&mut self, other: Stats) {
        self.total_requests = self.total_requests.saturating_add(other.total_requests);
        self.total_bytes = self.total_bytes.saturating_add(other.total_bytes);
        self.skipped_lines = self.skipped_lines.saturating_add(other.skipped_lines);
        self.max_response_ms = self.max_response_ms.max(other.max_response_ms);

        add_counts(&mut self.by_method, other.by_method);
        add_counts(&mut self.by_status, other.by_status);
        add_counts(&mut self.by_path, other.by_path);
        add_counts(&mut self.by_ip, other.by_ip);
        add_counts(&mut self.by_user_agent, other.by_user_agent);
    }
}

pub(crate) fn bump<K: Eq + Hash>(counts: &mut HashMap<K, u64>, key: K) {
    *counts.entry(key).or_insert(0) += 1;
}

fn add_counts<K: Eq + Hash>(into: &mut HashMap<K, u64>, from: HashMap<K, u64>) {
    for (key, count) in from {
        let slot = into.entry(key).or_insert(0);
        *slot = slot.saturating_add(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_counts_adds_keys() {
        let mut a = Stats::new();
        a.total_requests = 2;
        a.by_method.insert("GET".into(), 2);
        a.by_status.insert(200, 2);
        a.max_response_ms = 50;
        a.total_bytes = 100;

        let mut b = Stats::new();
        b.total_requests = 3;
        b.by_method.insert("GET".into(), 1);
        b.by_method.insert("POST".into(), 2);
        b.by_status.insert(500, 3);
        b.max_response_ms = 40;
        b.total_bytes = 7;
        b.skipped_lines = 4;

        a.merge_counts(b);

        assert_eq!(a.total_requests, 5);
        assert_eq!(a.by_method.get("GET"), Some(&3));
        assert_eq!(a.by_method.get("POST"), Some(&2));
        assert_eq!(a.by_status.get(&200), Some(&2));
        assert_eq!(a.by_status.get(&500), Some(&3));
        assert_eq!(a.max_response_ms, 50);
        assert_eq!(a.total_bytes, 107);
        assert_eq!(a.skipped_lines, 4);
    }

    #[test]
    fn test_merge_counts_leaves_average() {
        let mut a = Stats::new();
        a.avg_response_ms = 10.0;
        let mut b = Stats::new();
        b.avg_response_ms = 99.0;
        a.merge_counts(b);
        assert_eq!(a.avg_response_ms, 10.0);
    }

    #[test]
    fn test_serialize_status_keys() {
        let mut stats = Stats::new();
        stats.by_status.insert(404, 1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["by_status"]["404"], 1);

        let back: Stats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
