//! Query performance log: query text, latency, result count, error code.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trellis_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub latency: Duration,
    pub result_count: usize,
    /// Stable error code when the call failed.
    pub error_code: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl QueryLogEntry {
    pub fn success(query: impl Into<String>, latency: Duration, result_count: usize) -> Self {
        Self {
            query: query.into(),
            latency,
            result_count,
            error_code: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(query: impl Into<String>, latency: Duration, error_code: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            latency,
            result_count: 0,
            error_code: Some(error_code.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_code.is_some()
    }
}

/// Bounded query log; the oldest entries are dropped first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUERY_LOG_CAPACITY)
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            error_code = entry.error_code.as_deref().unwrap_or(""),
            "query logged"
        );
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&QueryLogEntry> {
        self.entries.back()
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at percentile `p` in `0.0..=1.0`.
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let p = p.clamp(0.0, 1.0);
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_error()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn averages_and_percentiles() {
        let mut log = QueryLog::new();
        for n in [10, 20, 30, 40] {
            log.record(QueryLogEntry::success("q", ms(n), 1));
        }
        assert_eq!(log.avg_latency(), ms(25));
        assert_eq!(log.latency_percentile(0.0), ms(10));
        assert_eq!(log.latency_percentile(1.0), ms(40));
        assert_eq!(log.latency_percentile(0.5), ms(30));
    }

    #[test]
    fn empty_log_reports_zero() {
        let log = QueryLog::new();
        assert_eq!(log.avg_latency(), Duration::ZERO);
        assert_eq!(log.latency_percentile(0.99), Duration::ZERO);
        assert!(log.last().is_none());
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let mut log = QueryLog::with_capacity(2);
        log.record(QueryLogEntry::success("a", ms(1), 0));
        log.record(QueryLogEntry::failure("b", ms(1), "timeout"));
        log.record(QueryLogEntry::success("c", ms(1), 3));
        let queries: Vec<&str> = log.entries().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["b", "c"]);
        assert_eq!(log.error_count(), 1);
        assert_eq!(log.last().unwrap().result_count, 3);
    }
}
