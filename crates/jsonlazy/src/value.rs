//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, the input accepted by the encoder
//! and the output of full materialization, along with helpers for rendering
//! values as compact JSON text.
use core::fmt;

use indexmap::IndexMap;

use crate::layout::TypeTag;

/// An insertion-ordered JSON object.
///
/// Order matters: object members are laid out in the buffer in the order they
/// were inserted.
pub type Map = IndexMap<String, Value>;

/// A JSON array.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// The `Value` enum can represent any JSON data type:
///
/// - Null
/// - Boolean
/// - Number
/// - String
/// - Array
/// - Object
///
/// # Examples
///
/// ```
/// use jsonlazy::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// A JSON `null`.
    #[default]
    Null,
    /// A JSON boolean.
    Boolean(bool),
    /// A JSON number, always a 64-bit float.
    Number(f64),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Array),
    /// A JSON object with insertion-ordered keys.
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

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl Value {
    /// The type tag this value is laid out under.
    #[must_use]
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Array(_) => TypeTag::Array,
            Self::Object(_) => TypeTag::Object,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlazy::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
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
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlazy::{Map, Value};
    ///
    /// assert!(Value::Object(Map::new()).is_object());
    /// assert!(!Value::Null.is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the inner value if this is a [`Value::Boolean`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Returns the inner value if this is a [`Value::Number`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Borrows the inner value if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(v) = self {
            Some(v.as_str())
        } else {
            None
        }
    }

    /// Borrows the inner value if this is a [`Value::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Borrows the inner value if this is a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        if let Self::Object(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Bitwise equality: numbers compare by their IEEE-754 bit pattern, so
    /// `NaN` equals an identical `NaN` and `0.0` differs from `-0.0`.
    #[must_use]
    pub fn bit_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.to_bits() == b.to_bits(),
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.bit_eq(y))
            }
            (Self::Object(a), Self::Object(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.bit_eq(vb))
            }
            (a, b) => a == b,
        }
    }
}

/// Escapes control characters in a string for inclusion in a JSON string
/// literal.
///
/// Quotes, backslashes, control characters and the Unicode line separators
/// are replaced with their JSON escape sequences.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            // Pre-2019 JSON parsers reject raw line separators.
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            // JSON escapes take exactly 4 hex digits, so only BMP controls are
            // escaped here.
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Renders compact JSON. JSON has no NaN or infinities, so non-finite numbers
/// render as `null`, as JavaScript's `JSON.stringify` does.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) if n.is_finite() => write!(f, "{n}"),
            Value::Number(_) => f.write_str("null"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
