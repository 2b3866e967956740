//! Timing helper for arbitrary fallible operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use tracing::warn;

use crate::monitor::{CacheOutcome, OperationMetric, SharedMonitor};

/// Milliseconds elapsed since `started`, with sub-millisecond precision.
pub(crate) fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Awaits `operation_future`, recording its duration and outcome.
///
/// The result is returned unchanged. The monitor lock is only taken after
/// the future completes.
pub async fn track<T, E, Fut>(
    monitor: &SharedMonitor,
    operation: &str,
    operation_future: Fut,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let started = Instant::now();
    let result = operation_future.await;
    let duration_ms = elapsed_ms(started);

    let metric = match &result {
        Ok(_) => OperationMetric::new(operation, duration_ms, true, CacheOutcome::NotApplicable),
        Err(err) => {
            warn!("{} failed after {:.2}ms: {}", operation, duration_ms, err);
            OperationMetric::new(operation, duration_ms, false, CacheOutcome::NotApplicable)
                .with_error(err.to_string())
        }
    };
    monitor.write().await.record_metric(metric);

    result
}
