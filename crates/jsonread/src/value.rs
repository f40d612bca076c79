//! JSON value types.
//!
//! This module defines the [`Value`] enum produced by [`read`](crate::read).
//! Objects keep their keys in insertion order; a repeated key overwrites the
//! earlier value in place.
use indexmap::IndexMap;

/// An insertion-ordered JSON object.
pub type Map = IndexMap<String, Value>;
/// A JSON array.
pub type Array = Vec<Value>;

/// A JSON value.
///
/// The `Value` enum can represent any value the reader accepts:
///
/// - Null
/// - Boolean
/// - Number, including the non-standard `NaN`, `Infinity` and `-Infinity`
/// - String
/// - Array
/// - Object
///
/// # Examples
///
/// ```
/// use jsonread::Value;
///
/// let v = jsonread::read(r#"{"key": ["value", 1]}"#).unwrap();
/// assert_eq!(v.get("key").and_then(|v| v.get(0)), Some(&Value::from("value")));
/// ```
// Serde support is compiled in for tests and when the optional `serde`
// feature is enabled.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(untagged))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Any number, parsed to the nearest double.
    Number(f64),
    /// A string with all escapes resolved.
    String(String),
    /// An ordered list of values.
    Array(Array),
    /// Members in document order.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Drop for Value {
    // Nested containers are flattened into a worklist so that dropping deeply
    // nested input never recurses.
    fn drop(&mut self) {
        let mut pending: Vec<Value> = match self {
            Self::Array(items) if !items.is_empty() => core::mem::take(items),
            Self::Object(map) if !map.is_empty() => map.drain(..).map(|(_, v)| v).collect(),
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Self::Array(items) => pending.append(items),
                Self::Object(map) => pending.extend(map.drain(..).map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

/// Anything a [`Value`] can be indexed by: a `usize` for arrays, a string for
/// objects.
pub trait ValueIndex {
    /// Looks `self` up in `value`, returning `None` on a kind mismatch or a
    /// missing entry.
    fn lookup(self, value: &Value) -> Option<&Value>;
}

impl ValueIndex for usize {
    fn lookup(self, value: &Value) -> Option<&Value> {
        match value {
            Value::Array(items) => items.get(self),
            _ => None,
        }
    }
}

impl ValueIndex for &str {
    fn lookup(self, value: &Value) -> Option<&Value> {
        match value {
            Value::Object(map) => map.get(self),
            _ => None,
        }
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the boolean, or `None` for any other kind of value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, or `None` for any other kind of value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, or `None` for any other kind of value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, or `None` for any other kind of value.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the members, or `None` for any other kind of value.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up an array element by index or an object member by key.
    ///
    /// # Examples
    ///
    /// ```
    /// let v = jsonread::read(r#"[{"a": null}]"#).unwrap();
    /// assert!(v.get(0).and_then(|o| o.get("a")).is_some_and(|a| a.is_null()));
    /// assert!(v.get("a").is_none());
    /// ```
    #[must_use]
    pub fn get<I: ValueIndex>(&self, index: I) -> Option<&Value> {
        index.lookup(self)
    }
}
