//! Out-of-band layout metadata.
//!
//! The buffer itself carries no framing: every byte belongs to some leaf and
//! nothing in the bytes says which. This module holds the tables that do.
//! Each object or array level gets one [`Table`]; each member of that level
//! gets one [`FieldDescriptor`] naming its absolute offset into the shared
//! buffer and a [`Payload`]: its type plus either its byte length (leaves) or
//! its child table (containers).
use core::{fmt, ops::Range};
use std::{collections::HashMap, sync::Arc};

use crate::{
    estimate::{BOOLEAN_WIDTH, NUMBER_WIDTH},
    key::{FieldKey, Key},
};

/// The type a field was encoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// 8 bytes, IEEE-754 double, little-endian.
    Number,
    /// 1 byte, `0x01` or `0x00`.
    Boolean,
    /// Raw UTF-8, no prefix or terminator.
    String,
    /// No bytes.
    Null,
    /// No bytes at the parent level; members live in a child table.
    Object,
    /// No bytes at the parent level; elements live in a child table.
    Array,
}

impl TypeTag {
    /// The lowercase JSON name of the type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Whether fields of this type carry a child table.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two shapes a table can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// Members keyed by name, in insertion order.
    Object,
    /// Elements keyed by position.
    Array,
}

impl Container {
    /// The tag a field holding this container carries.
    #[must_use]
    pub fn tag(self) -> TypeTag {
        match self {
            Self::Object => TypeTag::Object,
            Self::Array => TypeTag::Array,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tag().fmt(f)
    }
}

/// What a field holds: its type together with its byte length or child
/// table.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An 8-byte little-endian IEEE-754 double.
    Number,
    /// A single `0x01` or `0x00` byte.
    Boolean,
    /// This many bytes of UTF-8.
    String(usize),
    /// Nothing.
    Null,
    /// A nested object.
    Object(Arc<Table>),
    /// A nested array.
    Array(Arc<Table>),
}

impl Payload {
    /// The type tag of the payload.
    #[must_use]
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Number => TypeTag::Number,
            Self::Boolean => TypeTag::Boolean,
            Self::String(_) => TypeTag::String,
            Self::Null => TypeTag::Null,
            Self::Object(_) => TypeTag::Object,
            Self::Array(_) => TypeTag::Array,
        }
    }
}

/// Metadata for one encoded field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    key: FieldKey,
    offset: usize,
    payload: Payload,
}

impl FieldDescriptor {
    pub(crate) fn leaf(key: FieldKey, offset: usize, payload: Payload) -> Self {
        Self {
            key,
            offset,
            payload,
        }
    }

    pub(crate) fn nested(key: FieldKey, child: Table) -> Self {
        let offset = child.span().start;
        let child = Arc::new(child);
        let payload = match child.container() {
            Container::Object => Payload::Object(child),
            Container::Array => Payload::Array(child),
        };
        Self {
            key,
            offset,
            payload,
        }
    }

    /// The name or index this field is stored under.
    #[must_use]
    pub fn key(&self) -> &FieldKey {
        &self.key
    }

    /// The encoded type.
    #[must_use]
    pub fn tag(&self) -> TypeTag {
        self.payload.tag()
    }

    /// Absolute offset into the shared buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Type and length or child table.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Bytes covered by this field. For containers this is everything the
    /// nested level consumed.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        match &self.payload {
            Payload::Number => NUMBER_WIDTH,
            Payload::Boolean => BOOLEAN_WIDTH,
            Payload::String(len) => *len,
            Payload::Null => 0,
            Payload::Object(table) | Payload::Array(table) => table.span().len(),
        }
    }

    /// The absolute byte range covered by this field.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.byte_len()
    }

    /// The nested table, for object and array fields.
    #[must_use]
    pub fn child(&self) -> Option<&Arc<Table>> {
        match &self.payload {
            Payload::Object(table) | Payload::Array(table) => Some(table),
            _ => None,
        }
    }
}

/// The descriptor table of one object or array level.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    container: Container,
    fields: Vec<FieldDescriptor>,
    names: HashMap<Arc<str>, usize>,
    span: Range<usize>,
}

impl Table {
    pub(crate) fn new(container: Container, start: usize, capacity: usize) -> Self {
        Self {
            container,
            fields: Vec::with_capacity(capacity),
            names: HashMap::new(),
            span: start..start,
        }
    }

    /// Appends a field; `end` is the cursor after its payload.
    pub(crate) fn push(&mut self, field: FieldDescriptor, end: usize) {
        debug_assert!(field.offset() >= self.span.end);
        if let FieldKey::Name(name) = field.key() {
            self.names.insert(name.clone(), self.fields.len());
        }
        self.fields.push(field);
        self.span.end = end;
    }

    /// Object or array.
    #[must_use]
    pub fn container(&self) -> Container {
        self.container
    }

    /// The absolute byte range this level's members occupy.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the level has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptors in layout order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Checks that sibling ranges are ordered and disjoint, that every range
    /// lies inside this level's span and below `capacity`, and that each child
    /// table spans exactly its field's range.
    #[cfg(any(test, feature = "fuzzing"))]
    #[doc(hidden)]
    #[must_use]
    pub fn is_sound(&self, capacity: usize) -> bool {
        if self.span.end > capacity {
            return false;
        }
        let mut cursor = self.span.start;
        for field in &self.fields {
            let range = field.range();
            if range.start < cursor || range.end > self.span.end {
                return false;
            }
            if let Some(child) = field.child() {
                if child.span() != range || !child.is_sound(capacity) {
                    return false;
                }
            }
            cursor = range.end;
        }
        cursor == self.span.end
    }

    /// Finds a member's descriptor. Keys of the wrong kind for the container
    /// (a name on an array, an index on an object) find nothing.
    #[must_use]
    pub fn lookup(&self, key: Key<'_>) -> Option<&FieldDescriptor> {
        match (self.container, key) {
            (Container::Object, Key::Name(name)) => {
                self.names.get(name).map(|&i| &self.fields[i])
            }
            (Container::Array, Key::Index(index)) => self.fields.get(index),
            _ => None,
        }
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &Table, depth: usize) -> fmt::Result {
    for field in table.fields() {
        write!(f, "\n{:indent$}{}: ", "", field.key(), indent = depth * 2)?;
        if let Some(child) = field.child() {
            let span = child.span();
            write!(f, "{} {}..{}", child.container(), span.start, span.end)?;
            write_table(f, child, depth + 1)?;
        } else {
            write!(f, "{} @{}+{}", field.tag(), field.offset(), field.byte_len())?;
        }
    }
    Ok(())
}

/// Renders the layout as an indented listing, one field per line:
///
/// ```text
/// object 0..9
///   "a": number @0+8
///   "b": boolean @8+1
/// ```
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{}", self.container, self.span.start, self.span.end)?;
        write_table(f, self, 1)
    }
}
