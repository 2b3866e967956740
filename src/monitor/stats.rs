//! Monitor Statistics Module

use serde::Serialize;

use crate::monitor::OperationMetric;

/// One row of the slowest-operations view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowOperation {
    pub operation: String,
    pub duration_ms: f64,
}

impl From<&OperationMetric> for SlowOperation {
    fn from(metric: &OperationMetric) -> Self {
        Self {
            operation: metric.operation.clone(),
            duration_ms: metric.duration_ms,
        }
    }
}

// == Monitor Stats ==
/// Aggregate view over everything the monitor has recorded.
///
/// Counters and the average are cumulative since the last `clear`;
/// `slowest_operations` only looks at the retained buffer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStats {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// cache_hits / (cache_hits + cache_misses) * 100, 0 without cache traffic
    pub cache_hit_rate_percent: f64,
    pub avg_duration_ms: f64,
    /// Slowest retained operations, descending
    pub slowest_operations: Vec<SlowOperation>,
}
