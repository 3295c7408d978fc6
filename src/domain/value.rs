//! Dynamically shaped values and deep structural operations.
//!
//! [`Value`] is a closed tree over primitives, ordered sequences, and
//! string-keyed mappings. Deep equality and deep cloning are explicit
//! recursive traversals over that variant set rather than serialization
//! round-trips, so the comparison and duplication rules are visible and
//! testable. Cycles are unrepresentable: no variant holds a reference, so
//! every `Value` is a finite tree.

use crate::domain::seq::Truthy;
use std::collections::BTreeMap;

/// An arbitrarily nested value.
///
/// Sequences are ordered; mappings have unique string keys and compare
/// without regard to insertion order (a `BTreeMap` keeps them sorted).
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating-point number
    Float(f64),
    /// String
    Str(String),
    /// Ordered sequence of values
    Seq(Vec<Value>),
    /// String-keyed mapping
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Recursively duplicate this value.
    ///
    /// The result is [`deep_equal`] to the input (NaN floats excepted) and
    /// shares no storage with it: mutating any nested container of the
    /// clone leaves the original untouched.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(i) => Value::Int(*i),
            Value::Float(f) => Value::Float(*f),
            Value::Str(s) => Value::Str(s.clone()),
            Value::Seq(items) => Value::Seq(items.iter().map(Value::deep_clone).collect()),
            Value::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_clone()))
                    .collect(),
            ),
        }
    }
}

/// Structural equality over two [`Value`] trees.
///
/// Primitives compare by value; `Int` and `Float` are distinct variants and
/// never cross-equal. Floats use IEEE equality, so `NaN != NaN`. Sequences
/// compare element-wise in order; mappings compare by key set and per-key
/// recursion, independent of insertion order.
///
/// # Example
/// ```
/// use pacer::{deep_equal, Value};
/// use std::collections::BTreeMap;
///
/// let a = Value::Map(BTreeMap::from([
///     ("a".to_string(), Value::Int(1)),
///     ("b".to_string(), Value::Seq(vec![Value::Int(1), Value::Int(2)])),
/// ]));
/// let b = Value::Map(BTreeMap::from([
///     ("b".to_string(), Value::Seq(vec![Value::Int(1), Value::Int(2)])),
///     ("a".to_string(), Value::Int(1)),
/// ]));
/// assert!(deep_equal(&a, &b));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Seq(xs), Value::Seq(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(k, x)| match ys.get(k) {
                    Some(y) => deep_equal(x, y),
                    None => false,
                })
        }
        _ => false,
    }
}

/// Recursively duplicate a [`Value`]. Free-function form of
/// [`Value::deep_clone`].
pub fn deep_clone(value: &Value) -> Value {
    value.deep_clone()
}

/// Flatten one level of nesting.
///
/// Each `Seq` element contributes its children in order; every other
/// element passes through unchanged.
pub fn flatten(items: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Seq(inner) => out.extend(inner.iter().map(Value::deep_clone)),
            other => out.push(other.deep_clone()),
        }
    }
    out
}

/// Flatten through every level of nesting.
///
/// # Example
/// ```
/// use pacer::{flatten_deep, Value};
///
/// let nested = vec![
///     Value::Seq(vec![
///         Value::Int(1),
///         Value::Seq(vec![Value::Int(2), Value::Int(3)]),
///     ]),
///     Value::Seq(vec![Value::Int(4)]),
/// ];
/// let flat = flatten_deep(&nested);
/// assert_eq!(flat, vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]);
/// ```
pub fn flatten_deep(items: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Seq(inner) => out.extend(flatten_deep(inner)),
            other => out.push(other.deep_clone()),
        }
    }
    out
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

impl Truthy for Value {
    /// `Null`, `false`, zero, NaN, and the empty string are falsy;
    /// sequences and mappings are always truthy.
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Seq(_) | Value::Map(_) => true,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Value;
    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::ser::{SerializeMap, SerializeSeq};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;
    use std::fmt;

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Int(i) => serializer.serialize_i64(*i),
                Value::Float(f) => serializer.serialize_f64(*f),
                Value::Str(s) => serializer.serialize_str(s),
                Value::Seq(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                Value::Map(entries) => {
                    let mut map = serializer.serialize_map(Some(entries.len()))?;
                    for (k, v) in entries {
                        map.serialize_entry(k, v)?;
                    }
                    map.end()
                }
            }
        }
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = Value;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a null, bool, number, string, sequence, or map")
        }

        fn visit_unit<E>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_none<E>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Value, D::Error> {
            d.deserialize_any(ValueVisitor)
        }

        fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
            Ok(Value::Bool(b))
        }

        fn visit_i64<E>(self, i: i64) -> Result<Value, E> {
            Ok(Value::Int(i))
        }

        fn visit_u64<E: serde::de::Error>(self, u: u64) -> Result<Value, E> {
            i64::try_from(u)
                .map(Value::Int)
                .map_err(|_| E::custom("integer out of range for i64"))
        }

        fn visit_f64<E>(self, f: f64) -> Result<Value, E> {
            Ok(Value::Float(f))
        }

        fn visit_str<E>(self, s: &str) -> Result<Value, E> {
            Ok(Value::Str(s.to_string()))
        }

        fn visit_string<E>(self, s: String) -> Result<Value, E> {
            Ok(Value::Str(s))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
            let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(item) = access.next_element()? {
                items.push(item);
            }
            Ok(Value::Seq(items))
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
            let mut entries = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<String, Value>()? {
                entries.insert(key, value);
            }
            Ok(Value::Map(entries))
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
            deserializer.deserialize_any(ValueVisitor)
        }
    }
}
