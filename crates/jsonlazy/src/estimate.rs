//! Upper bounds on encoded length.
//!
//! The encoder allocates exactly once, so whatever these functions return
//! must be at least what it writes. Traversal uses an explicit work list so
//! arbitrarily deep values cannot overflow the stack here.
use crate::{options::SizeEstimate, value::Value};

/// Encoded width of a number.
pub const NUMBER_WIDTH: usize = 8;
/// Encoded width of a boolean.
pub const BOOLEAN_WIDTH: usize = 1;

// Conservative widths. A `char` never takes more than 4 bytes of UTF-8,
// supplementary-plane characters included.
const CONSERVATIVE_BOOLEAN_WIDTH: usize = 4;
const CONSERVATIVE_CHAR_WIDTH: usize = 4;

/// Bytes the encoder will write for `value`.
///
/// # Examples
///
/// ```
/// use jsonlazy::{Value, estimate};
///
/// let v: Value = [Value::Number(1.0), Value::Boolean(true), "héllo".into()]
///     .into_iter()
///     .collect();
/// assert_eq!(estimate(&v), 8 + 1 + 6);
/// ```
#[must_use]
pub fn estimate(value: &Value) -> usize {
    estimate_with(value, SizeEstimate::Exact)
}

/// Upper bound on the bytes the encoder will write for `value` under the
/// given strategy.
#[must_use]
pub fn estimate_with(value: &Value, strategy: SizeEstimate) -> usize {
    let mut total = 0usize;
    let mut pending = vec![value];

    while let Some(value) = pending.pop() {
        total += match value {
            Value::Null => 0,
            Value::Number(_) => NUMBER_WIDTH,
            Value::Boolean(_) => match strategy {
                SizeEstimate::Exact => BOOLEAN_WIDTH,
                SizeEstimate::Conservative => CONSERVATIVE_BOOLEAN_WIDTH,
            },
            Value::String(s) => match strategy {
                SizeEstimate::Exact => s.len(),
                SizeEstimate::Conservative => s.chars().count() * CONSERVATIVE_CHAR_WIDTH,
            },
            Value::Array(items) => {
                pending.extend(items);
                0
            }
            Value::Object(members) => {
                pending.extend(members.values());
                0
            }
        };
    }

    total
}
