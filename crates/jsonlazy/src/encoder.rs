//! Linearizes a value tree into one buffer plus descriptor tables.
//!
//! The buffer is sized by the estimator and allocated once. Members are laid
//! out depth-first in object insertion order and array index order, so
//! encoding the same value twice yields the same bytes and the same tables.
//! Traversal keeps an explicit stack of open levels rather than recursing, so
//! nesting depth is bounded only by memory (and by
//! [`EncodeOptions::max_depth`] when set).
use std::{iter::Enumerate, slice, sync::Arc};

use log::{debug, trace};

use crate::{
    error::EncodeError,
    estimate::estimate_with,
    key::FieldKey,
    layout::{Container, FieldDescriptor, Payload, Table},
    options::EncodeOptions,
    record::{Encoded, Record},
    value::{Map, Value},
    view::View,
};

/// Encodes values under a fixed set of options.
///
/// # Examples
///
/// ```
/// use jsonlazy::{EncodeOptions, Encoder, Map, Value};
///
/// let mut map = Map::new();
/// map.insert("n".into(), Value::Number(1.5));
/// let encoded = Encoder::new(EncodeOptions::default())
///     .encode(&Value::Object(map))
///     .unwrap();
/// assert_eq!(encoded.written(), 8);
/// assert_eq!(encoded.view().get("n").unwrap().unwrap().as_f64(), Some(1.5));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

/// Members of one container still waiting to be encoded.
enum Members<'v> {
    Object(indexmap::map::Iter<'v, String, Value>),
    Array(Enumerate<slice::Iter<'v, Value>>),
}

impl<'v> Iterator for Members<'v> {
    type Item = (FieldKey, &'v Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Object(members) => members
                .next()
                .map(|(name, value)| (FieldKey::from(name.as_str()), value)),
            Self::Array(items) => items.next().map(|(i, value)| (FieldKey::Index(i), value)),
        }
    }
}

/// A container whose table is still being filled.
struct Level<'v> {
    table: Table,
    members: Members<'v>,
}

impl<'v> Level<'v> {
    fn object(members: &'v Map, start: usize) -> Self {
        Self {
            table: Table::new(Container::Object, start, members.len()),
            members: Members::Object(members.iter()),
        }
    }

    fn array(items: &'v [Value], start: usize) -> Self {
        Self {
            table: Table::new(Container::Array, start, items.len()),
            members: Members::Array(items.iter().enumerate()),
        }
    }
}

/// The innermost open level.
fn innermost<'s, 'v>(
    root: &'s mut Level<'v>,
    nested: &'s mut [(FieldKey, Level<'v>)],
) -> &'s mut Level<'v> {
    match nested.last_mut() {
        Some((_, level)) => level,
        None => root,
    }
}

impl Encoder {
    /// Creates an encoder with the given options.
    #[must_use]
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// The options this encoder was built with.
    #[must_use]
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encodes `value`, which must be an object or an array.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnsupportedType`] if `value` is a scalar.
    /// - [`EncodeError::DepthLimitExceeded`] if [`EncodeOptions::max_depth`]
    ///   is set and `value` nests deeper.
    /// - [`EncodeError::SizeUnderestimate`] if the size estimate proves too
    ///   small; this indicates a bug, not bad input.
    pub fn encode(&self, value: &Value) -> Result<Encoded, EncodeError> {
        let root = match value {
            Value::Object(members) => Level::object(members, 0),
            Value::Array(items) => Level::array(items, 0),
            scalar => {
                return Err(EncodeError::unsupported(format!(
                    "a {} cannot be the root; expected an object or array",
                    scalar.tag()
                )));
            }
        };

        let capacity = estimate_with(value, self.options.size_estimate);
        let mut buffer = vec![0u8; capacity];
        let (table, written) = self.encode_levels(&mut buffer, root)?;

        debug!(
            "encoded {} root: {written} of {capacity} bytes ({:?} estimate)",
            table.container(),
            self.options.size_estimate
        );

        let root = Record::new(Arc::from(buffer), Arc::new(table));
        Ok(Encoded::new(root, written))
    }

    fn encode_levels(
        &self,
        buffer: &mut [u8],
        mut root: Level<'_>,
    ) -> Result<(Table, usize), EncodeError> {
        let mut nested: Vec<(FieldKey, Level<'_>)> = Vec::new();
        let mut cursor = 0;

        loop {
            let level = innermost(&mut root, &mut nested);
            let Some((key, value)) = level.members.next() else {
                let Some((key, done)) = nested.pop() else {
                    break;
                };
                trace!(
                    "{} at depth {}: {} fields in {}..{cursor}",
                    done.table.container(),
                    nested.len() + 1,
                    done.table.len(),
                    done.table.span().start
                );
                innermost(&mut root, &mut nested)
                    .table
                    .push(FieldDescriptor::nested(key, done.table), cursor);
                continue;
            };

            let (payload, end) = match value {
                Value::Number(n) => (Payload::Number, write(buffer, cursor, &n.to_le_bytes())?),
                Value::Boolean(b) => (Payload::Boolean, write(buffer, cursor, &[u8::from(*b)])?),
                Value::String(s) => (Payload::String(s.len()), write(buffer, cursor, s.as_bytes())?),
                Value::Null => (Payload::Null, cursor),
                Value::Object(members) => {
                    self.check_depth(nested.len() + 1)?;
                    nested.push((key, Level::object(members, cursor)));
                    continue;
                }
                Value::Array(items) => {
                    self.check_depth(nested.len() + 1)?;
                    nested.push((key, Level::array(items, cursor)));
                    continue;
                }
            };
            level.table.push(FieldDescriptor::leaf(key, cursor, payload), end);
            cursor = end;
        }

        trace!(
            "{} root: {} fields in 0..{cursor}",
            root.table.container(),
            root.table.len()
        );
        Ok((root.table, cursor))
    }

    fn check_depth(&self, depth: usize) -> Result<(), EncodeError> {
        match self.options.max_depth {
            Some(limit) if depth > limit => Err(EncodeError::DepthLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}

/// Copies `bytes` in at `cursor`, returning the advanced cursor. Never writes
/// past the allocation.
pub(crate) fn write(buffer: &mut [u8], cursor: usize, bytes: &[u8]) -> Result<usize, EncodeError> {
    let end = cursor + bytes.len();
    let capacity = buffer.len();
    buffer
        .get_mut(cursor..end)
        .ok_or(EncodeError::SizeUnderestimate {
            needed: end,
            capacity,
        })?
        .copy_from_slice(bytes);
    Ok(end)
}

/// Encodes `value` with default options and returns a view over the root.
///
/// # Errors
///
/// See [`Encoder::encode`].
///
/// # Examples
///
/// ```
/// use jsonlazy::{Value, encode};
///
/// let view = encode(&Value::from(vec![Value::Null, Value::Boolean(true)])).unwrap();
/// assert!(view.get(0).unwrap().unwrap().is_null());
/// assert_eq!(view.get(1).unwrap().unwrap().as_bool(), Some(true));
/// assert!(view.get(2).unwrap().is_none());
/// ```
pub fn encode(value: &Value) -> Result<View, EncodeError> {
    encode_with(value, &EncodeOptions::default())
}

/// Encodes `value` with the given options and returns a view over the root.
///
/// # Errors
///
/// See [`Encoder::encode`].
pub fn encode_with(value: &Value, options: &EncodeOptions) -> Result<View, EncodeError> {
    Encoder::new(*options).encode(value).map(Encoded::into_view)
}
