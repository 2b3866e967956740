//! Memoization Module
//!
//! Derives cache keys from call arguments and wraps computations with the
//! shared cache and operation monitor.

mod args;
mod canonical;
mod key;
mod memoizer;

pub use args::{ArgValue, CallArgs};
pub use key::CacheKey;
pub use memoizer::{MemoFuture, Memoizer};
