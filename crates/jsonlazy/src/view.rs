//! Lazy, read-only access to encoded records.
//!
//! A [`View`] decodes nothing up front. Each [`View::get`] finds one
//! descriptor, reads exactly that field's byte range from the source, and
//! decodes it. Nested objects and arrays come back as further views over the
//! same shared buffer; none of their members are read until asked for.
use bstr::BString;

use crate::{
    error::DecodeError,
    estimate::BOOLEAN_WIDTH,
    key::{FieldKey, Key},
    layout::{Container, FieldDescriptor, Payload, TypeTag},
    record::Record,
    source::{ByteSource, SharedBuffer},
    value::{Map, Value},
};

/// A field decoded from the buffer.
///
/// Strings borrow directly from the buffer; containers are views that have
/// not decoded anything yet.
#[derive(Debug, Clone)]
pub enum Decoded<'a, S = SharedBuffer> {
    /// A `null` field.
    Null,
    /// A boolean field.
    Boolean(bool),
    /// A number field.
    Number(f64),
    /// A string field, borrowed from the buffer.
    String(&'a str),
    /// A nested object.
    Object(View<S>),
    /// A nested array.
    Array(View<S>),
}

impl<S: ByteSource> Decoded<'_, S> {
    /// The type tag of the decoded field.
    #[must_use]
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Object(_) => TypeTag::Object,
            Self::Array(_) => TypeTag::Array,
        }
    }

    /// Returns `true` if the field is `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// The number, if this is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// The string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// The nested view, if this is an object or array.
    #[must_use]
    pub fn as_view(&self) -> Option<&View<S>> {
        match self {
            Self::Object(view) | Self::Array(view) => Some(view),
            _ => None,
        }
    }

    /// Consumes the field, returning the nested view if it is an object or
    /// array.
    #[must_use]
    pub fn into_view(self) -> Option<View<S>> {
        match self {
            Self::Object(view) | Self::Array(view) => Some(view),
            _ => None,
        }
    }

    /// Fully materializes the field, decoding every nested member.
    ///
    /// # Errors
    ///
    /// The first [`DecodeError`] hit anywhere below this field.
    pub fn to_value(&self) -> Result<Value, DecodeError> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Boolean(*b),
            Self::Number(n) => Value::Number(*n),
            Self::String(s) => Value::String((*s).to_owned()),
            Self::Object(view) | Self::Array(view) => view.to_value()?,
        })
    }
}

/// Compares by materializing; fields that fail to decode are unequal to
/// everything.
impl<S: ByteSource> PartialEq<Value> for Decoded<'_, S> {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Null, Value::Null) => true,
            (Self::Boolean(a), Value::Boolean(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Self::Number(a), Value::Number(b)) => a == b,
            (Self::String(a), Value::String(b)) => a == b,
            (Self::Object(view) | Self::Array(view), other) => {
                view.to_value().is_ok_and(|value| value == *other)
            }
            _ => false,
        }
    }
}

/// A read-only, field-addressable view over one encoded object or array.
///
/// Cloning a view is cheap: it shares the buffer and the table.
///
/// # Examples
///
/// ```
/// use jsonlazy::{Map, Value, encode};
///
/// let mut inner = Map::new();
/// inner.insert("f".into(), "nested".into());
/// let mut outer = Map::new();
/// outer.insert("d".into(), Value::Null);
/// outer.insert("e".into(), Value::Object(inner));
///
/// let view = encode(&Value::Object(outer)).unwrap();
/// assert!(view.get("d").unwrap().unwrap().is_null());
/// assert!(view.get("missing").unwrap().is_none());
///
/// let e = view.get("e").unwrap().unwrap().into_view().unwrap();
/// assert_eq!(e.get("f").unwrap().unwrap().as_str(), Some("nested"));
/// ```
#[derive(Debug, Clone)]
pub struct View<S = SharedBuffer> {
    record: Record<S>,
}

impl<S: ByteSource> View<S> {
    pub(crate) fn new(record: Record<S>) -> Self {
        Self { record }
    }

    /// The record this view reads.
    #[must_use]
    pub fn record(&self) -> &Record<S> {
        &self.record
    }

    /// Object or array.
    #[must_use]
    pub fn kind(&self) -> Container {
        self.record.table().container()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.record.table().len()
    }

    /// Whether there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record.table().is_empty()
    }

    /// Member keys in layout order.
    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> + '_ {
        self.record.table().fields().iter().map(FieldDescriptor::key)
    }

    /// The descriptor for `key`, without reading the buffer.
    #[must_use]
    pub fn descriptor<'k>(&self, key: impl Into<Key<'k>>) -> Option<&FieldDescriptor> {
        self.record.table().lookup(key.into())
    }

    /// Decodes one field.
    ///
    /// Returns `Ok(None)` when there is no such field, which is distinct from
    /// `Ok(Some(Decoded::Null))` for a field that holds `null`. Names look up
    /// object members and integers look up array elements; a key of the other
    /// kind is simply absent.
    ///
    /// # Errors
    ///
    /// A [`DecodeError`] if this field's bytes cannot be decoded. Other fields
    /// of the same view are unaffected.
    pub fn get<'k>(
        &self,
        key: impl Into<Key<'k>>,
    ) -> Result<Option<Decoded<'_, S>>, DecodeError> {
        self.descriptor(key)
            .map(|field| self.decode(field))
            .transpose()
    }

    /// Lazily decodes every member in layout order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&FieldKey, Result<Decoded<'_, S>, DecodeError>)> + '_ {
        self.record
            .table()
            .fields()
            .iter()
            .map(|field| (field.key(), self.decode(field)))
    }

    /// Walks nested containers by key without decoding any leaf.
    ///
    /// Returns `None` if a step is missing or lands on something that is not
    /// an object or array.
    #[must_use]
    pub fn descend(&self, path: &[Key<'_>]) -> Option<View<S>> {
        let mut record = self.record.clone();
        for &key in path {
            let child = record.table().lookup(key)?.child()?;
            record = record.child(child);
        }
        Some(record.into_view())
    }

    /// Materializes whatever sits at `path`.
    ///
    /// An empty path materializes this view. Returns `Ok(None)` if any step is
    /// missing.
    ///
    /// # Errors
    ///
    /// The first [`DecodeError`] hit while materializing the target.
    pub fn get_path(&self, path: &[Key<'_>]) -> Result<Option<Value>, DecodeError> {
        let Some((&last, parents)) = path.split_last() else {
            return self.to_value().map(Some);
        };
        let Some(parent) = self.descend(parents) else {
            return Ok(None);
        };
        parent.get(last)?.map(|field| field.to_value()).transpose()
    }

    /// Fully materializes this level and everything below it.
    ///
    /// # Errors
    ///
    /// The first [`DecodeError`] hit.
    pub fn to_value(&self) -> Result<Value, DecodeError> {
        match self.kind() {
            Container::Object => {
                let mut map = Map::with_capacity(self.len());
                for (key, field) in self.iter() {
                    let name = key.as_name().unwrap_or_default();
                    map.insert(name.to_owned(), field?.to_value()?);
                }
                Ok(Value::Object(map))
            }
            Container::Array => self
                .iter()
                .map(|(_, field)| field?.to_value())
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    fn decode(&self, field: &FieldDescriptor) -> Result<Decoded<'_, S>, DecodeError> {
        let offset = field.offset();
        Ok(match field.payload() {
            Payload::Null => Decoded::Null,
            Payload::Number => Decoded::Number(f64::from_le_bytes(self.read_array(offset)?)),
            Payload::Boolean => {
                let [byte] = self.read_array::<BOOLEAN_WIDTH>(offset)?;
                Decoded::Boolean(byte == 1)
            }
            Payload::String(len) => {
                let bytes = self.read(offset, *len)?;
                let s = core::str::from_utf8(bytes).map_err(|source| DecodeError::InvalidUtf8 {
                    offset,
                    bytes: BString::from(bytes),
                    source,
                })?;
                Decoded::String(s)
            }
            Payload::Object(table) => Decoded::Object(self.record.child(table).into_view()),
            Payload::Array(table) => Decoded::Array(self.record.child(table).into_view()),
        })
    }

    fn read(&self, offset: usize, len: usize) -> Result<&[u8], DecodeError> {
        let source = self.record.buffer();
        offset
            .checked_add(len)
            .and_then(|end| source.read(offset..end))
            .ok_or(DecodeError::OutOfBounds {
                offset,
                len,
                available: source.len(),
            })
    }

    fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], DecodeError> {
        let bytes = self.read(offset, N)?;
        bytes.try_into().map_err(|_| DecodeError::OutOfBounds {
            offset,
            len: N,
            available: self.record.buffer().len(),
        })
    }
}
