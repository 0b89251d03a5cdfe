//! Dynamic value representation for structured CPL data.
//!
//! This module provides the [`Value`] enum, the nested-tree counterpart of a
//! flat [`Record`](crate::Record). It is what the JSON/YAML bridges consume
//! and produce, and what [`flatten`](crate::flatten) /
//! [`unflatten`](crate::unflatten) convert to and from.
//!
//! ## Core Types
//!
//! - [`Value`]: a tagged variant over null, bool, number, string, sequence, mapping
//! - [`Number`]: an integer or finite float with a canonical decimal rendering
//!
//! ## The coercion boundary
//!
//! CPL lines are untyped text. All native-type inference lives here, at the
//! record-model boundary, never in the tokenizer:
//!
//! - the empty string is the designated null token
//! - `true` / `false` are booleans
//! - a string coerces to a number only when re-rendering the parsed number
//!   reproduces the input byte-for-byte (so `007`, `1.50`, and `NaN` stay
//!   strings)
//!
//! ```rust
//! use cpl::Value;
//!
//! assert_eq!(Value::coerce(""), Value::Null);
//! assert_eq!(Value::coerce("true"), Value::from(true));
//! assert_eq!(Value::coerce("42"), Value::from(42));
//! assert_eq!(Value::coerce("007"), Value::from("007"));
//! ```
//!
//! ## Serde bridge
//!
//! `Value` implements `Serialize` and `Deserialize`, so tree-shaped external
//! data moves losslessly through any serde format without the CPL core
//! knowing about it:
//!
//! ```rust
//! use cpl::{cpl, Value};
//!
//! let value = cpl!({ "name": "Adi", "role": "scribe" });
//! let json = serde_json::to_value(&value).unwrap();
//! let back: Value = serde_json::from_value(json).unwrap();
//! assert_eq!(back, value);
//! ```

use crate::Map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any structured CPL value.
///
/// # Examples
///
/// ```rust
/// use cpl::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Map),
}

/// A numeric value: an `i64` integer or an `f64` float.
///
/// Floats render with a canonical decimal form: whole floats keep a `.0`
/// suffix (`1.0`, not `1`) so the integer/float distinction survives a
/// flatten/unflatten round-trip. Non-finite floats have no flat
/// representation and never come out of [`Value::coerce`].
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is an integer.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to an `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) => {
                // Keep the `.0` on whole floats so coercion can tell them
                // apart from integers.
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
        }
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u16> for Number {
    fn from(value: u16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpl::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as an `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Coerces a raw scalar string into its native-typed [`Value`].
    ///
    /// This is the single type-inference point of the crate. A string becomes
    /// a number or boolean only when the coerced value's canonical rendering
    /// reproduces the input exactly; everything else stays a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpl::{Number, Value};
    ///
    /// assert_eq!(Value::coerce(""), Value::Null);
    /// assert_eq!(Value::coerce("false"), Value::Bool(false));
    /// assert_eq!(Value::coerce("-3"), Value::Number(Number::Integer(-3)));
    /// assert_eq!(Value::coerce("1.5"), Value::Number(Number::Float(1.5)));
    /// assert_eq!(Value::coerce("1.50"), Value::String("1.50".to_string()));
    /// ```
    #[must_use]
    pub fn coerce(raw: &str) -> Value {
        if raw.is_empty() {
            return Value::Null;
        }
        match raw {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            if Number::Integer(i).to_string() == raw {
                return Value::Number(Number::Integer(i));
            }
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() && Number::Float(f).to_string() == raw {
                return Value::Number(Number::Float(f));
            }
        }
        Value::String(raw.to_string())
    }

    /// Returns the canonical scalar rendering of this value, or `None` for
    /// sequences and mappings.
    ///
    /// This is the exact inverse of [`Value::coerce`] for values in canonical
    /// form: booleans render as `true`/`false`, null as the empty string,
    /// numbers in minimal decimal form without locale formatting.
    #[must_use]
    pub fn scalar_repr(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(seq) => {
                write!(
                    f,
                    "[{}]",
                    seq.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Mapping(map) => write!(f, "{{mapping of {} entries}}", map.len()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(x)) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(seq) => {
                use serde::ser::SerializeSeq;
                let mut state = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    state.serialize_element(element)?;
                }
                state.end()
            }
            Value::Mapping(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any structured CPL value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Number(Number::Integer(value as i64)))
                } else {
                    Ok(Value::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Sequence(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Mapping(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Mapping(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_scalars() {
        assert_eq!(Value::coerce(""), Value::Null);
        assert_eq!(Value::coerce("true"), Value::Bool(true));
        assert_eq!(Value::coerce("false"), Value::Bool(false));
        assert_eq!(Value::coerce("42"), Value::Number(Number::Integer(42)));
        assert_eq!(Value::coerce("-7"), Value::Number(Number::Integer(-7)));
        assert_eq!(Value::coerce("1.5"), Value::Number(Number::Float(1.5)));
        assert_eq!(Value::coerce("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_coerce_rejects_non_canonical_numbers() {
        assert_eq!(Value::coerce("007"), Value::String("007".to_string()));
        assert_eq!(Value::coerce("+5"), Value::String("+5".to_string()));
        assert_eq!(Value::coerce("1.50"), Value::String("1.50".to_string()));
        assert_eq!(Value::coerce("1e3"), Value::String("1e3".to_string()));
        assert_eq!(Value::coerce("NaN"), Value::String("NaN".to_string()));
        assert_eq!(Value::coerce("inf"), Value::String("inf".to_string()));
    }

    #[test]
    fn test_whole_floats_keep_their_suffix() {
        let n = Number::Float(1.0);
        assert_eq!(n.to_string(), "1.0");
        assert_eq!(Value::coerce("1.0"), Value::Number(Number::Float(1.0)));
        assert_eq!(Value::coerce("1"), Value::Number(Number::Integer(1)));
    }

    #[test]
    fn test_scalar_repr_inverts_coerce() {
        for raw in ["", "true", "false", "42", "-7", "1.5", "1.0", "hello", "007"] {
            let value = Value::coerce(raw);
            assert_eq!(value.scalar_repr().as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_containers_have_no_scalar_repr() {
        assert_eq!(Value::Sequence(vec![]).scalar_repr(), None);
        assert_eq!(Value::Mapping(Map::new()).scalar_repr(), None);
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::Number(Number::Integer(42)));
        assert_eq!(Value::from(3.5f64), Value::Number(Number::Float(3.5)));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(42).as_i64(), Some(42));
        assert_eq!(Value::from(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::Null.is_null());
        assert!(Value::Sequence(vec![]).is_sequence());
        assert!(Value::Mapping(Map::new()).is_mapping());
    }
}
