//! Call Arguments Module
//!
//! Canonical form of a call's arguments for cache key derivation.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{CacheError, Result};
use crate::memo::canonical::{float_value, to_canonical_value};

// == Arg Value ==
/// A primitive that can be passed directly as a call argument.
///
/// Floats keep NaN and the infinities apart instead of collapsing them into
/// `null`.
pub trait ArgValue {
    fn into_arg(self) -> Value;
}

macro_rules! impl_arg_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgValue for $ty {
                fn into_arg(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_arg_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, String, &str, Value);

impl ArgValue for f64 {
    fn into_arg(self) -> Value {
        float_value(self)
    }
}

impl ArgValue for f32 {
    fn into_arg(self) -> Value {
        float_value(f64::from(self))
    }
}

impl<T: ArgValue> ArgValue for Option<T> {
    fn into_arg(self) -> Value {
        self.map_or(Value::Null, ArgValue::into_arg)
    }
}

// == Call Args ==
/// Positional and keyword arguments of a memoized call.
///
/// Keyword arguments are kept sorted by name, and every value is held as a
/// JSON value whose objects are also key-sorted, so equivalent calls
/// canonicalize identically regardless of call-site ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl ArgValue) -> Self {
        self.positional.push(value.into_arg());
        self
    }

    /// Sets a keyword argument. A repeated name keeps the last value.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl ArgValue) -> Self {
        self.keyword.insert(name.into(), value.into_arg());
        self
    }

    /// Appends any serializable value as a positional argument.
    pub fn arg_serialized<T: Serialize + ?Sized>(self, operation: &str, value: &T) -> Result<Self> {
        let value = to_value(operation, value)?;
        Ok(self.arg(value))
    }

    /// Builds arguments from a single serializable value.
    ///
    /// Tuples and sequences spread into positional arguments; structs and
    /// maps become keyword arguments; anything else is one positional arg.
    pub fn from_serialize<T: Serialize + ?Sized>(operation: &str, value: &T) -> Result<Self> {
        Ok(match to_value(operation, value)? {
            Value::Array(items) => Self {
                positional: items,
                keyword: BTreeMap::new(),
            },
            Value::Object(fields) => Self {
                positional: Vec::new(),
                keyword: fields.into_iter().collect(),
            },
            Value::Null => Self::new(),
            other => Self::new().arg(other),
        })
    }

    /// Stable textual form: `{"args":[...],"kwargs":{...}}` with sorted keys.
    pub fn canonical(&self) -> String {
        json!({
            "args": self.positional,
            "kwargs": self.keyword,
        })
        .to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

fn to_value<T: Serialize + ?Sized>(operation: &str, value: &T) -> Result<Value> {
    to_canonical_value(value).map_err(|source| CacheError::InvalidArgument {
        operation: operation.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, Serializer};
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct SessionQuery {
        year: u16,
        event: &'static str,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("refused"))
        }
    }

    #[test]
    fn test_keyword_order_is_normalized() {
        let a = CallArgs::new().arg(2024).kwarg("session", "R").kwarg("event", "Monaco");
        let b = CallArgs::new().arg(2024).kwarg("event", "Monaco").kwarg("session", "R");

        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_positional_order_matters() {
        let a = CallArgs::new().arg(1).arg(2);
        let b = CallArgs::new().arg(2).arg(1);

        assert_ne!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_nested_maps_are_sorted() {
        let mut first = HashMap::new();
        first.insert("z", 1);
        first.insert("a", 2);
        let mut second = HashMap::new();
        second.insert("a", 2);
        second.insert("z", 1);

        let a = CallArgs::new().arg_serialized("op", &first).unwrap();
        let b = CallArgs::new().arg_serialized("op", &second).unwrap();

        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(a.canonical(), r#"{"args":[{"a":2,"z":1}],"kwargs":{}}"#);
    }

    #[test]
    fn test_primitive_types_are_distinguished() {
        let number = CallArgs::new().arg(1);
        let text = CallArgs::new().arg("1");

        assert_ne!(number.canonical(), text.canonical());
    }

    #[test]
    fn test_non_finite_floats_are_distinguished() {
        let canonical = [
            CallArgs::new().arg(f64::INFINITY).canonical(),
            CallArgs::new().arg(f64::NEG_INFINITY).canonical(),
            CallArgs::new().arg(f64::NAN).canonical(),
            CallArgs::new().arg(Value::Null).canonical(),
        ];

        for (i, a) in canonical.iter().enumerate() {
            for b in &canonical[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(canonical[0], r#"{"args":[{"$f64":"inf"}],"kwargs":{}}"#);
    }

    #[test]
    fn test_from_serialize_keeps_non_finite_floats() {
        let positive = CallArgs::from_serialize("op", &(1, f64::INFINITY)).unwrap();
        let negative = CallArgs::from_serialize("op", &(1, f64::NEG_INFINITY)).unwrap();

        assert_eq!(positive, CallArgs::new().arg(1).arg(f64::INFINITY));
        assert_ne!(positive.canonical(), negative.canonical());
    }

    #[test]
    fn test_optional_argument() {
        assert_eq!(CallArgs::new().arg(None::<u16>), CallArgs::new().arg(Value::Null));
        assert_eq!(CallArgs::new().arg(Some(3u16)), CallArgs::new().arg(3));
    }

    #[test]
    fn test_from_serialize_tuple_and_struct() {
        let tuple = CallArgs::from_serialize("op", &(2024, "Monaco")).unwrap();
        assert_eq!(tuple, CallArgs::new().arg(2024).arg("Monaco"));

        let query = SessionQuery { year: 2024, event: "Monaco" };
        let structured = CallArgs::from_serialize("op", &query).unwrap();
        assert_eq!(structured, CallArgs::new().kwarg("year", 2024).kwarg("event", "Monaco"));

        assert!(CallArgs::from_serialize("op", &()).unwrap().is_empty());
    }

    #[test]
    fn test_unserializable_argument() {
        let result = CallArgs::new().arg_serialized("load", &Unserializable);
        assert!(matches!(result, Err(CacheError::InvalidArgument { .. })));
    }
}
