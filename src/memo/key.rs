//! Cache Key Module

use std::fmt;

use sha2::{Digest, Sha256};

use crate::memo::CallArgs;

/// Number of digest bytes kept in a key.
const DIGEST_BYTES: usize = 16;

// == Cache Key ==
/// Deterministic cache key for one (operation, arguments) pair.
///
/// Format: `{operation}:{hex digest of canonical arguments}`. The operation
/// name stays readable so log lines show what a key belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(operation: &str, args: &CallArgs) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(operation.as_bytes());
        hasher.update([0u8]);
        hasher.update(args.canonical().as_bytes());
        let digest = hasher.finalize();

        Self(format!("{}:{}", operation, hex::encode(&digest[..DIGEST_BYTES])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let args = CallArgs::new().arg(2024).arg("Monaco");

        assert_eq!(CacheKey::derive("f", &args), CacheKey::derive("f", &args.clone()));
    }

    #[test]
    fn test_key_format() {
        let key = CacheKey::derive("load_schedule", &CallArgs::new().arg(2024));

        let (name, digest) = key.as_str().split_once(':').unwrap();
        assert_eq!(name, "load_schedule");
        assert_eq!(digest.len(), DIGEST_BYTES * 2);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_depends_on_operation_and_args() {
        let args = CallArgs::new().arg(1).arg(2);

        assert_ne!(CacheKey::derive("f", &args), CacheKey::derive("g", &args));
        assert_ne!(
            CacheKey::derive("f", &args),
            CacheKey::derive("f", &CallArgs::new().arg(1).arg(3))
        );
    }

    #[test]
    fn test_key_ignores_keyword_order() {
        let a = CallArgs::new().kwarg("year", 2023).kwarg("round", 5);
        let b = CallArgs::new().kwarg("round", 5).kwarg("year", 2023);

        assert_eq!(CacheKey::derive("f", &a), CacheKey::derive("f", &b));
    }

    #[test]
    fn test_non_finite_float_keys_differ() {
        let derive = |value: f64| CacheKey::derive("f", &CallArgs::new().arg(value));

        assert_ne!(derive(f64::INFINITY), derive(f64::NEG_INFINITY));
        assert_ne!(derive(f64::INFINITY), derive(f64::NAN));
        assert_ne!(
            derive(f64::NAN),
            CacheKey::derive("f", &CallArgs::new().arg(serde_json::Value::Null))
        );
        assert_eq!(derive(f64::NAN), derive(f64::NAN));
    }
}
