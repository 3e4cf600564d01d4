use core::fmt;
use std::sync::Arc;

/// The name or index a field is stored under.
///
/// Object fields are keyed by name, array elements by position. Descriptors
/// own their keys; lookups use the borrowed [`Key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// An object member name.
    Name(Arc<str>),
    /// An array position.
    Index(usize),
}

/// A borrowed lookup key, as accepted by [`View::get`](crate::View::get).
///
/// Anything that names a field converts into a `Key`: string slices for
/// object members, integers for array positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'k> {
    /// An object member name.
    Name(&'k str),
    /// An array position.
    Index(usize),
}

impl FieldKey {
    /// Returns the index if this key is an index, otherwise `None`.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        if let Self::Index(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Returns the name if this key is a name, otherwise `None`.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        if let Self::Name(v) = self {
            Some(&**v)
        } else {
            None
        }
    }

    /// Borrows this key for a lookup.
    #[must_use]
    pub fn as_key(&self) -> Key<'_> {
        match self {
            Self::Name(name) => Key::Name(name),
            Self::Index(index) => Key::Index(*index),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_key().fmt(f)
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name:?}"),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl<'k> From<&'k str> for Key<'k> {
    fn from(s: &'k str) -> Self {
        Key::Name(s)
    }
}

impl<'k> From<&'k String> for Key<'k> {
    fn from(s: &'k String) -> Self {
        Key::Name(s)
    }
}

impl<'k> From<&'k FieldKey> for Key<'k> {
    fn from(k: &'k FieldKey) -> Self {
        k.as_key()
    }
}

// Integer conversions so callers can write `view.get(0)` and `path![0, "x"]`.
macro_rules! impl_integer_as_key {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Key<'_> {
                fn from(i: $t) -> Self {
                    // Negative or oversized indices are never present, and no
                    // array can hold an element at `usize::MAX`.
                    Key::Index(usize::try_from(i).unwrap_or(usize::MAX))
                }
            }
        )+
    };
}
impl_integer_as_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<&str> for FieldKey {
    fn from(s: &str) -> Self {
        Self::Name(s.into())
    }
}

impl From<usize> for FieldKey {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

// A `Vec<FieldKey>` serializes as e.g. `["foo", 0, "bar"]` instead of the
// default tagged representation.
#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, Unexpected, Visitor},
    };

    use super::FieldKey;

    impl Serialize for FieldKey {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                FieldKey::Name(k) => serializer.serialize_str(k),
                FieldKey::Index(i) => serializer.serialize_u64(*i as u64),
            }
        }
    }

    struct FieldKeyVisitor;

    impl Visitor<'_> for FieldKeyVisitor {
        type Value = FieldKey;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or unsigned integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(FieldKey::Name(value.into()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value)
                .map(FieldKey::Index)
                .map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &"a usize index"))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value).map(FieldKey::Index).map_err(|_| {
                Error::invalid_value(Unexpected::Signed(value), &"non-negative index")
            })
        }
    }

    impl<'de> Deserialize<'de> for FieldKey {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(FieldKeyVisitor)
        }
    }
}
