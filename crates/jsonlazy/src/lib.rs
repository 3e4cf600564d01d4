//! Encode JSON-like value trees into one contiguous buffer and read them back
//! lazily, one field at a time.
//!
//! [`encode`] walks a [`Value`] depth-first and writes every leaf into a
//! single buffer sized up front by [`estimate`]. The buffer carries no
//! framing at all: numbers are 8 little-endian bytes, booleans one byte,
//! strings raw UTF-8, `null` and containers nothing. Where each field lives is
//! recorded out of band in per-level descriptor [`Table`]s.
//!
//! The [`View`] returned by [`encode`] decodes a field only when
//! [`View::get`] asks for it. Nested objects and arrays come back as further
//! views over the same shared buffer.
//!
//! ```
//! use jsonlazy::{Map, Value, encode, path};
//!
//! let mut point = Map::new();
//! point.insert("x".into(), Value::Number(1.0));
//! point.insert("label".into(), "origin".into());
//! let doc = Value::from(vec![Value::Object(point), Value::Null]);
//!
//! let view = encode(&doc).unwrap();
//! let first = view.get(0).unwrap().unwrap().into_view().unwrap();
//! assert_eq!(first.get("label").unwrap().unwrap().as_str(), Some("origin"));
//! assert_eq!(
//!     view.get_path(&path![0, "x"]).unwrap(),
//!     Some(Value::Number(1.0))
//! );
//! ```

mod encoder;
mod error;
mod estimate;
#[cfg(feature = "serde_json")]
mod json;
mod key;
mod layout;
mod options;
mod record;
mod source;
mod value;
mod view;

#[cfg(test)]
mod tests;

pub use encoder::{Encoder, encode, encode_with};
pub use error::{DecodeError, EncodeError};
pub use estimate::{BOOLEAN_WIDTH, NUMBER_WIDTH, estimate, estimate_with};
#[cfg(feature = "serde_json")]
pub use json::encode_json;
pub use key::{FieldKey, Key};
pub use layout::{Container, FieldDescriptor, Payload, Table, TypeTag};
pub use options::{EncodeOptions, SizeEstimate};
pub use record::{Encoded, Record};
pub use source::{ByteSource, SharedBuffer};
pub use value::{Array, Map, Value};
pub use view::{Decoded, View};

#[doc(hidden)]
pub use std::vec;

/// Macro to build a `Vec<Key>` from a heterogeneous list of member names and
/// array indices, for [`View::descend`] and [`View::get_path`].
///
/// ```rust
/// # use jsonlazy::{path, Key};
/// let p = path![0, "foo", 2];
/// assert_eq!(p, vec![Key::Index(0), Key::Name("foo"), Key::Index(2)]);
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        $crate::vec![$($crate::Key::from($elem)),*]
    }};
}
