//! Monitor Module
//!
//! Records per-operation telemetry and serves aggregate statistics.

mod metric;
mod recorder;
mod stats;
mod track;


use std::sync::Arc;

use tokio::sync::RwLock;

pub use metric::{CacheOutcome, OperationMetric};
pub use recorder::OperationMonitor;
pub use stats::{MonitorStats, SlowOperation};
pub use track::track;
pub(crate) use track::elapsed_ms;

/// Process-wide monitor handle.
pub type SharedMonitor = Arc<RwLock<OperationMonitor>>;
