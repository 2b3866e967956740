//! Memoizer Module
//!
//! Consults the shared cache before running a computation and reports every
//! call to the operation monitor.

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::error::CacheError;
use crate::memo::{CacheKey, CallArgs};
use crate::monitor::{elapsed_ms, CacheOutcome, OperationMetric, SharedMonitor};

/// Boxed future returned by functions built with [`Memoizer::wrap`].
pub type MemoFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

// == Memoizer ==
/// Turns computations into cached computations.
///
/// Cheap to clone; clones share the same cache and monitor.
#[derive(Debug, Clone)]
pub struct Memoizer {
    cache: SharedCache,
    monitor: SharedMonitor,
}

impl Memoizer {
    pub fn new(cache: SharedCache, monitor: SharedMonitor) -> Self {
        Self { cache, monitor }
    }

    // == Memoize ==
    /// Returns the cached result for `(operation, args)`, or runs `compute`.
    ///
    /// On a hit `compute` is not called and the lookup time is recorded. On
    /// a miss `compute` runs once with no lock held; a successful result is
    /// stored for `ttl_seconds`, a failure is recorded and returned unchanged
    /// without touching the cache. Concurrent misses for the same key may
    /// each run `compute`; the last store wins.
    ///
    /// Only layer-internal failures (a cached payload that no longer decodes
    /// as `T`) are converted through `E: From<CacheError>`.
    pub async fn memoize<T, E, F, Fut>(
        &self,
        operation: &str,
        args: &CallArgs,
        ttl_seconds: u64,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError> + Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = CacheKey::derive(operation, args);

        let lookup_started = Instant::now();
        let cached = self.cache.write().await.get(key.as_str());

        if let Some(payload) = cached {
            let lookup_ms = elapsed_ms(lookup_started);
            return match serde_json::from_value::<T>(payload) {
                Ok(value) => {
                    debug!(key = %key, "memoized hit");
                    self.monitor
                        .write()
                        .await
                        .record(operation, lookup_ms, true, CacheOutcome::Hit);
                    Ok(value)
                }
                Err(source) => {
                    let err = CacheError::Decode {
                        operation: operation.to_string(),
                        source,
                    };
                    warn!(key = %key, "{}", err);
                    self.monitor.write().await.record_metric(
                        OperationMetric::new(operation, lookup_ms, false, CacheOutcome::Hit)
                            .with_error(err.to_string()),
                    );
                    Err(err.into())
                }
            };
        }

        debug!(key = %key, "memoized miss");
        let started = Instant::now();
        let result = compute().await;
        let duration_ms = elapsed_ms(started);

        match result {
            Ok(value) => {
                match serde_json::to_value(&value) {
                    Ok(payload) => {
                        self.cache
                            .write()
                            .await
                            .set(key.into_string(), payload, Some(ttl_seconds));
                    }
                    Err(source) => {
                        let err = CacheError::Encode {
                            operation: operation.to_string(),
                            source,
                        };
                        warn!("{}; returning uncached result", err);
                    }
                }
                self.monitor
                    .write()
                    .await
                    .record(operation, duration_ms, true, CacheOutcome::Miss);
                Ok(value)
            }
            Err(err) => {
                warn!("{} failed after {:.2}ms: {}", operation, duration_ms, err);
                self.monitor.write().await.record_metric(
                    OperationMetric::new(operation, duration_ms, false, CacheOutcome::Miss)
                        .with_error(err.to_string()),
                );
                Err(err)
            }
        }
    }

    // == Wrap ==
    /// Builds a memoized version of `f`.
    ///
    /// The argument is canonicalized with [`CallArgs::from_serialize`], so a
    /// tuple behaves like positional arguments and a struct like keyword
    /// arguments.
    pub fn wrap<A, T, E, F, Fut>(
        &self,
        operation: impl Into<String>,
        ttl_seconds: u64,
        f: F,
    ) -> impl Fn(A) -> MemoFuture<T, E>
    where
        A: Serialize + Send + Sync + 'static,
        T: Serialize + DeserializeOwned + Send + 'static,
        E: From<CacheError> + Display + Send + 'static,
        F: Fn(A) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let memoizer = self.clone();
        let operation = operation.into();

        move |args: A| {
            let memoizer = memoizer.clone();
            let operation = operation.clone();
            let f = f.clone();

            let fut: MemoFuture<T, E> = Box::pin(async move {
                let call_args = match CallArgs::from_serialize(&operation, &args) {
                    Ok(call_args) => call_args,
                    Err(err) => return Err(E::from(err)),
                };
                memoizer
                    .memoize(&operation, &call_args, ttl_seconds, move || f(args))
                    .await
            });
            fut
        }
    }
}
