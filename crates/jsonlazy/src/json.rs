//! Encoding `serde_json` documents.
//!
//! `serde_json` numbers may be integers that a 64-bit float cannot hold
//! exactly. Those are rejected rather than silently rounded.
use crate::{
    encoder::encode,
    error::EncodeError,
    value::{Map, Value},
    view::View,
};

// Integers within this magnitude survive a round trip through `f64`.
const MAX_SAFE_INTEGER: u64 = (1 << f64::MANTISSA_DIGITS) - 1;

fn number_to_f64(n: &serde_json::Number) -> Result<f64, EncodeError> {
    let exact = if let Some(u) = n.as_u64() {
        u <= MAX_SAFE_INTEGER
    } else if let Some(i) = n.as_i64() {
        i.unsigned_abs() <= MAX_SAFE_INTEGER
    } else {
        true
    };

    match n.as_f64() {
        Some(f) if exact => Ok(f),
        _ => Err(EncodeError::unsupported(format!(
            "number {n} is not exactly representable as a 64-bit float"
        ))),
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = EncodeError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => Value::Number(number_to_f64(n)?),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(members) => {
                let mut map = Map::with_capacity(members.len());
                for (name, member) in members {
                    map.insert(name.clone(), Value::try_from(member)?);
                }
                Value::Object(map)
            }
        })
    }
}

/// Converts a `serde_json` document and encodes it with default options.
///
/// # Errors
///
/// [`EncodeError::UnsupportedType`] for integers beyond ±(2^53 - 1), plus
/// everything [`encode`] can return.
///
/// # Examples
///
/// ```
/// let view = jsonlazy::encode_json(&serde_json::json!({"id": 7, "tags": ["a"]})).unwrap();
/// assert_eq!(view.get("id").unwrap().unwrap().as_f64(), Some(7.0));
///
/// let err = jsonlazy::encode_json(&serde_json::json!({"id": u64::MAX})).unwrap_err();
/// assert!(matches!(err, jsonlazy::EncodeError::UnsupportedType { .. }));
/// ```
pub fn encode_json(value: &serde_json::Value) -> Result<View, EncodeError> {
    encode(&Value::try_from(value)?)
}
