//! Dynamic payloads with one-level shallow equality.
//!
//! [`Value`] is the payload of [`AnyRef`], the fully dynamic ref used where tag
//! and payload shapes are only known at runtime (e.g. refs rebuilt from JSON).
//!
//! Composite values (`List`, `Record`) hold their contents behind an `Arc`.
//! Equality between two values looks one level deep: top-level elements or
//! fields are compared by value if primitive and by allocation identity if
//! composite. Nested composites with equal contents but separate allocations
//! are therefore *not* equal.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;

/// A ref with a runtime string tag and a dynamic payload.
pub type AnyRef = EntityRef<String, Value>;

/// Dynamic payload: a primitive or a flat composite.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Arc<Vec<Value>>),
    Record(Arc<BTreeMap<String, Value>>),
}

impl Value {
    /// Build a list from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build a record from `(key, value)` pairs. Later keys overwrite earlier ones.
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(Arc::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Returns `true` for null, booleans, numbers, and strings.
    pub fn is_primitive(&self) -> bool {
        !self.is_composite()
    }

    /// Returns `true` for lists and records.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::List(_) | Value::Record(_))
    }

    /// Short name of the value's shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Look up a top-level record field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Identity comparison used for the elements of a composite.
    ///
    /// Primitives compare by value; composites only when they share an
    /// allocation.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (a, b) if a.is_primitive() && b.is_primitive() => primitive_eq(a, b),
            _ => false,
        }
    }

    /// Convert a JSON document into a value.
    ///
    /// Integers that fit `i64` become [`Value::Int`]; every other number
    /// becomes [`Value::Float`].
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items.into_iter().map(Value::from_json)),
            serde_json::Value::Object(fields) => {
                Value::record(fields.into_iter().map(|(k, v)| (k, Value::from_json(v))))
            }
        }
    }
}

fn primitive_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => int_float_eq(*i, *f),
        (Value::Str(x), Value::Str(y)) => x == y,
        _ => false,
    }
}

/// Exact comparison. The float must be integral and inside the `i64` range;
/// the integer is never rounded, which keeps equality transitive past 2^53.
fn int_float_eq(i: i64, f: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.identical(y)))
            }
            (Value::Record(a), Value::Record(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.len() == b.len()
                        && a.iter()
                            .all(|(k, v)| b.get(k).is_some_and(|w| v.identical(w))))
            }
            _ => self.identical(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(_) | Value::Record(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
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
        Value::List(Arc::new(items))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Value::Record(Arc::new(fields))
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_compare_by_value() {
        assert_eq!(Value::from(1), Value::from(1));
        assert_ne!(Value::from(1), Value::from(2));
        assert_eq!(Value::from("a"), Value::from("a"));
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::from(true), Value::from(1));
    }

    #[test]
    fn int_and_float_with_same_number_are_equal() {
        assert_eq!(Value::from(2), Value::from(2.0));
        assert_ne!(Value::from(2), Value::from(2.5));
    }

    #[test]
    fn int_float_equality_is_exact_for_large_numbers() {
        let two_53: i64 = 1 << 53;
        let a = Value::Int(two_53 + 1);
        let b = Value::Float(two_53 as f64);
        let c = Value::Int(two_53);

        assert_ne!(a, b);
        assert_eq!(b, c);
        assert_ne!(a, c);

        assert_ne!(Value::Int(i64::MAX), Value::Float(9_223_372_036_854_775_808.0));
        assert_eq!(Value::Int(i64::MIN), Value::Float(i64::MIN as f64));
        assert_ne!(Value::Int(0), Value::Float(f64::NAN));
        assert_ne!(Value::Int(i64::MAX), Value::Float(f64::INFINITY));
    }

    #[test]
    fn primitive_never_equals_composite() {
        assert_ne!(Value::from(1), Value::list([1]));
        assert_ne!(Value::record([("id", 1)]), Value::from(1));
    }

    #[test]
    fn list_never_equals_record() {
        assert_ne!(Value::list([1]), Value::record([("0", 1)]));
    }

    #[test]
    fn records_need_the_same_keys() {
        let a = Value::record([("id", 1)]);
        let b = Value::record([("id", 1), ("name", 2)]);
        let c = Value::record([("key", 1)]);
        assert_ne!(a, b);
        assert_ne!(b, a);
        assert_ne!(a, c);
    }

    #[test]
    fn nested_composites_compare_by_identity() {
        let inner = Value::list([1, 2]);
        let shared_a = Value::record([("items", inner.clone())]);
        let shared_b = Value::record([("items", inner)]);
        assert_eq!(shared_a, shared_b);

        let fresh_a = Value::record([("items", Value::list([1, 2]))]);
        let fresh_b = Value::record([("items", Value::list([1, 2]))]);
        assert_ne!(fresh_a, fresh_b);
    }

    #[test]
    fn identical_is_strict_for_composites() {
        let a = Value::list([1]);
        assert!(a.identical(&a.clone()));
        assert!(!a.identical(&Value::list([1])));
        assert!(Value::from(3).identical(&Value::from(3)));
    }

    #[test]
    fn shape_queries() {
        assert!(Value::from(1).is_primitive());
        assert!(Value::list(Vec::<Value>::new()).is_composite());
        assert_eq!(Value::record([("a", 1)]).kind(), "record");
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(Some(4)).as_i64(), Some(4));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn record_lookup() {
        let v = Value::record([("id", Value::from(10)), ("name", Value::from("w"))]);
        assert_eq!(v.get("id").and_then(Value::as_i64), Some(10));
        assert_eq!(v.get("name").and_then(Value::as_str), Some("w"));
        assert!(v.get("missing").is_none());
        assert!(Value::from(1).get("id").is_none());
    }

    #[test]
    fn from_json_maps_shapes() {
        let json = serde_json::json!({"id": 1, "ratio": 0.5, "tags": ["a"], "none": null});
        let v = Value::from_json(json);
        assert_eq!(v.get("id"), Some(&Value::Int(1)));
        assert_eq!(v.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(v.get("none"), Some(&Value::Null));
        assert_eq!(v.get("tags").map(Value::kind), Some("list"));
    }

    #[test]
    fn display_uses_json_for_composites() {
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::record([("id", 1)]).to_string(), r#"{"id":1}"#);
        assert_eq!(Value::list([1, 2]).to_string(), "[1,2]");
    }

    #[test]
    fn serde_roundtrip() {
        let v = Value::record([("id", Value::from(1)), ("name", Value::from("p"))]);
        let json = serde_json::to_string(&v).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get("id"), v.get("id"));
        assert_eq!(parsed.get("name"), v.get("name"));
    }
}
