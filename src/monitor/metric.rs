//! Operation Metric Module
//!
//! A single recorded unit of work: what ran, how long it took, how it ended.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Outcome ==
/// Whether a recorded operation was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheOutcome {
    Hit,
    Miss,
    /// The operation did not go through the cache
    NotApplicable,
}

// == Operation Metric ==
/// An immutable telemetry record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetric {
    /// Name of the monitored operation
    pub operation: String,
    /// Wall-clock duration in milliseconds, stored as given
    pub duration_ms: f64,
    pub success: bool,
    pub cache_outcome: CacheOutcome,
    /// When the metric was recorded
    pub timestamp: DateTime<Utc>,
    /// Failure message for unsuccessful operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationMetric {
    /// Creates a metric stamped with the current time.
    pub fn new(
        operation: impl Into<String>,
        duration_ms: f64,
        success: bool,
        cache_outcome: CacheOutcome,
    ) -> Self {
        Self {
            operation: operation.into(),
            duration_ms,
            success,
            cache_outcome,
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Attaches a failure message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl fmt::Display for OperationMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "ok" } else { "failed" };
        write!(f, "[{}] {}: {:.2}ms", status, self.operation, self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_display() {
        let ok = OperationMetric::new("load_schedule", 12.346, true, CacheOutcome::Miss);
        let failed = OperationMetric::new("load_session", 3.0, false, CacheOutcome::NotApplicable);

        assert_eq!(ok.to_string(), "[ok] load_schedule: 12.35ms");
        assert_eq!(failed.to_string(), "[failed] load_session: 3.00ms");
    }

    #[test]
    fn test_metric_serialization() {
        let metric = OperationMetric::new("op", 1.5, false, CacheOutcome::Hit).with_error("boom");
        let json = serde_json::to_value(&metric).unwrap();

        assert_eq!(json["operation"], "op");
        assert_eq!(json["durationMs"], 1.5);
        assert_eq!(json["cacheOutcome"], "hit");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_negative_duration_is_kept() {
        let metric = OperationMetric::new("op", -4.0, true, CacheOutcome::NotApplicable);
        assert_eq!(metric.duration_ms, -4.0);
    }
}
