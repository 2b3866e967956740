//! Operation Monitor Module
//!
//! Aggregates operation metrics into running counters and a bounded history.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::cache::hit_rate_percent;
use crate::monitor::{CacheOutcome, MonitorStats, OperationMetric, SlowOperation};

/// Running totals. Never decremented when old metrics leave the buffer.
#[derive(Debug, Clone, Copy, Default)]
struct MonitorCounters {
    total: u64,
    successful: u64,
    failed: u64,
    cache_hits: u64,
    cache_misses: u64,
    total_duration_ms: f64,
}

// == Operation Monitor ==
/// Telemetry sink for monitored operations.
///
/// Keeps the most recent `max_metrics` metrics for detail views and
/// cumulative counters for everything ever recorded.
#[derive(Debug)]
pub struct OperationMonitor {
    /// Retained metrics, oldest at the front
    metrics: VecDeque<OperationMetric>,
    counters: MonitorCounters,
    max_metrics: usize,
    /// Number of slowest operations embedded in `stats()`
    slowest_limit: usize,
}

impl OperationMonitor {
    // == Constructor ==
    pub fn new(max_metrics: usize, slowest_limit: usize) -> Self {
        Self {
            metrics: VecDeque::with_capacity(max_metrics.min(1024)),
            counters: MonitorCounters::default(),
            max_metrics,
            slowest_limit,
        }
    }

    // == Record ==
    /// Records the outcome of one operation.
    pub fn record(
        &mut self,
        operation: impl Into<String>,
        duration_ms: f64,
        success: bool,
        cache_outcome: CacheOutcome,
    ) {
        self.record_metric(OperationMetric::new(
            operation,
            duration_ms,
            success,
            cache_outcome,
        ));
    }

    /// Records a pre-built metric, dropping the oldest retained one if the
    /// buffer is full.
    pub fn record_metric(&mut self, metric: OperationMetric) {
        let counters = &mut self.counters;
        counters.total += 1;
        counters.total_duration_ms += metric.duration_ms;
        if metric.success {
            counters.successful += 1;
        } else {
            counters.failed += 1;
        }
        match metric.cache_outcome {
            CacheOutcome::Hit => counters.cache_hits += 1,
            CacheOutcome::Miss => counters.cache_misses += 1,
            CacheOutcome::NotApplicable => {}
        }

        debug!(metric = %metric, "metric recorded");

        self.metrics.push_back(metric);
        while self.metrics.len() > self.max_metrics {
            self.metrics.pop_front();
        }
    }

    // == Stats ==
    /// Computes aggregate statistics. Well-defined with nothing recorded.
    pub fn stats(&self) -> MonitorStats {
        let c = &self.counters;
        let avg_duration_ms = if c.total == 0 {
            0.0
        } else {
            c.total_duration_ms / c.total as f64
        };

        MonitorStats {
            total: c.total,
            successful: c.successful,
            failed: c.failed,
            cache_hits: c.cache_hits,
            cache_misses: c.cache_misses,
            cache_hit_rate_percent: hit_rate_percent(c.cache_hits, c.cache_misses),
            avg_duration_ms,
            slowest_operations: self
                .slowest_operations(self.slowest_limit)
                .into_iter()
                .map(SlowOperation::from)
                .collect(),
        }
    }

    /// Mean duration of retained metrics for `operation`, or 0 if none match.
    pub fn average_duration(&self, operation: &str) -> f64 {
        let (sum, count) = self
            .metrics
            .iter()
            .filter(|m| m.operation == operation)
            .fold((0.0, 0usize), |(sum, count), m| (sum + m.duration_ms, count + 1));

        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// The `limit` slowest retained metrics, descending by duration.
    ///
    /// Equal durations are ordered most recent first.
    pub fn slowest_operations(&self, limit: usize) -> Vec<&OperationMetric> {
        let mut ranked: Vec<(usize, &OperationMetric)> = self.metrics.iter().enumerate().collect();
        ranked.sort_by(|(ia, a), (ib, b)| {
            b.duration_ms
                .total_cmp(&a.duration_ms)
                .then_with(|| ib.cmp(ia))
        });
        ranked.into_iter().take(limit).map(|(_, m)| m).collect()
    }

    /// All retained metrics with `success == false`, oldest first.
    pub fn failed_operations(&self) -> Vec<&OperationMetric> {
        self.metrics.iter().filter(|m| !m.success).collect()
    }

    /// Retained metrics, oldest first.
    pub fn metrics(&self) -> impl Iterator<Item = &OperationMetric> {
        self.metrics.iter()
    }

    // == Clear ==
    /// Resets counters and the retained buffer.
    pub fn clear(&mut self) {
        self.metrics.clear();
        self.counters = MonitorCounters::default();
        info!("Operation monitor cleared");
    }

    /// Number of retained metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn max_metrics(&self) -> usize {
        self.max_metrics
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> OperationMonitor {
        OperationMonitor::new(1000, 3)
    }

    #[test]
    fn test_record_and_count() {
        let mut m = monitor();

        m.record("op1", 5.0, true, CacheOutcome::NotApplicable);

        assert_eq!(m.len(), 1);
        assert_eq!(m.stats().total, 1);
        assert_eq!(m.stats().successful, 1);
    }

    #[test]
    fn test_stats_on_empty_monitor() {
        let stats = monitor().stats();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.cache_hit_rate_percent, 0.0);
        assert_eq!(stats.avg_duration_ms, 0.0);
        assert!(stats.slowest_operations.is_empty());
    }

    #[test]
    fn test_cache_hit_rate() {
        let mut m = monitor();

        m.record("op", 1.0, true, CacheOutcome::Hit);
        m.record("op", 1.0, true, CacheOutcome::Hit);
        m.record("op", 1.0, true, CacheOutcome::Miss);
        m.record("op", 1.0, true, CacheOutcome::NotApplicable);

        let stats = m.stats();
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.cache_misses, 1);
        assert!((stats.cache_hit_rate_percent - 66.67).abs() < 0.01);
    }

    #[test]
    fn test_average_duration() {
        let mut m = monitor();

        m.record("op1", 10.0, true, CacheOutcome::NotApplicable);
        m.record("op1", 20.0, true, CacheOutcome::NotApplicable);
        m.record("op2", 30.0, true, CacheOutcome::NotApplicable);

        assert_eq!(m.stats().avg_duration_ms, 20.0);
        assert_eq!(m.average_duration("op1"), 15.0);
        assert_eq!(m.average_duration("unknown"), 0.0);
    }

    #[test]
    fn test_slowest_operations() {
        let mut m = monitor();

        m.record("fast", 5.0, true, CacheOutcome::NotApplicable);
        m.record("slow", 50.0, true, CacheOutcome::NotApplicable);
        m.record("medium", 25.0, true, CacheOutcome::NotApplicable);

        let slowest = m.slowest_operations(2);
        assert_eq!(slowest.len(), 2);
        assert_eq!(slowest[0].operation, "slow");
        assert_eq!(slowest[1].operation, "medium");
    }

    #[test]
    fn test_slowest_operations_ties_prefer_recent() {
        let mut m = monitor();

        m.record("first", 10.0, true, CacheOutcome::NotApplicable);
        m.record("second", 10.0, true, CacheOutcome::NotApplicable);
        m.record("third", 10.0, true, CacheOutcome::NotApplicable);

        let names: Vec<&str> = m
            .slowest_operations(3)
            .into_iter()
            .map(|metric| metric.operation.as_str())
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_stats_embed_slowest_limit() {
        let mut m = OperationMonitor::new(100, 2);
        for i in 0..5 {
            m.record(format!("op{}", i), i as f64, true, CacheOutcome::NotApplicable);
        }

        let slowest = m.stats().slowest_operations;
        assert_eq!(
            slowest,
            vec![
                SlowOperation { operation: "op4".to_string(), duration_ms: 4.0 },
                SlowOperation { operation: "op3".to_string(), duration_ms: 3.0 },
            ]
        );
    }

    #[test]
    fn test_failed_operations() {
        let mut m = monitor();

        m.record("ok", 1.0, true, CacheOutcome::Miss);
        m.record_metric(
            OperationMetric::new("broken", 2.0, false, CacheOutcome::Miss).with_error("timeout"),
        );

        let failed = m.failed_operations();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].operation, "broken");
        assert_eq!(failed[0].error.as_deref(), Some("timeout"));
        assert_eq!(m.stats().failed, 1);
    }

    #[test]
    fn test_ring_buffer_keeps_counters() {
        let mut m = OperationMonitor::new(2, 3);

        m.record("a", 100.0, true, CacheOutcome::Hit);
        m.record("b", 1.0, false, CacheOutcome::Miss);
        m.record("c", 2.0, true, CacheOutcome::Miss);

        assert_eq!(m.len(), 2);
        let stats = m.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.failed, 1);
        // "a" left the buffer, so it no longer ranks
        assert_eq!(m.slowest_operations(1)[0].operation, "c");
    }

    #[test]
    fn test_zero_retention_still_counts() {
        let mut m = OperationMonitor::new(0, 3);

        m.record("a", 1.0, true, CacheOutcome::NotApplicable);

        assert!(m.is_empty());
        assert_eq!(m.stats().total, 1);
    }

    #[test]
    fn test_clear() {
        let mut m = monitor();

        m.record("op1", 10.0, true, CacheOutcome::Hit);
        m.clear();

        assert!(m.is_empty());
        assert_eq!(m.stats(), MonitorStats::default());
    }
}
