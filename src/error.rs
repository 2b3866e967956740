//! Error types for the memoization layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the cache and memoization layer itself.
///
/// Failures of a wrapped computation are never wrapped in this type; they are
/// handed back to the caller unchanged.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A call argument could not be serialized for key derivation
    #[error("Invalid argument for '{operation}': {source}")]
    InvalidArgument {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// A computed result could not be converted into a cacheable payload
    #[error("Failed to encode result of '{operation}': {source}")]
    Encode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// A cached payload could not be converted back into the requested type
    #[error("Failed to decode cached result of '{operation}': {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the memoization layer.
pub type Result<T> = std::result::Result<T, CacheError>;
