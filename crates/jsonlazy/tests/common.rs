#![allow(missing_docs, dead_code)]

use jsonlazy::{Map, Value};

const MAX_SAFE_INTEGER: u64 = (1 << f64::MANTISSA_DIGITS) - 1;

/// `{"a":42.5,"b":true,"c":"hi","d":null,"e":{"f":"nested"}}`
pub const SAMPLE: &str = r#"{"a":42.5,"b":true,"c":"hi","d":null,"e":{"f":"nested"}}"#;

/// `{"arr":[1,2,{"x":"y"}]}`
pub const ARRAYS: &str = r#"{"arr":[1,2,{"x":"y"}]}"#;

/// Parses JSON text into a [`Value`], keeping member order.
///
/// These fixtures must build without the `serde_json` feature, so this
/// mirrors `Value::try_from(&serde_json::Value)` instead of calling it, and
/// panics on the same integers that conversion rejects.
pub fn from_json(text: &str) -> Value {
    convert(&serde_json::from_str(text).expect("test JSON is valid"))
}

fn convert(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => {
            let exact = n.as_u64().map_or_else(
                || n.as_i64().is_none_or(|i| i.unsigned_abs() <= MAX_SAFE_INTEGER),
                |u| u <= MAX_SAFE_INTEGER,
            );
            assert!(exact, "{n} is not exactly representable as f64");
            Value::Number(n.as_f64().expect("finite test number"))
        }
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => items.iter().map(convert).collect(),
        serde_json::Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), convert(v)))
                .collect::<Map>(),
        ),
    }
}
