use std::sync::Arc;

use crate::{
    layout::Table,
    source::{ByteSource, SharedBuffer},
    view::View,
};

/// One object or array level: the shared buffer plus that level's
/// descriptor table.
///
/// Records are immutable. Cloning one clones two reference counts; the bytes
/// are never copied.
#[derive(Debug, Clone)]
pub struct Record<S = SharedBuffer> {
    buffer: S,
    table: Arc<Table>,
}

impl<S: ByteSource> Record<S> {
    pub(crate) fn new(buffer: S, table: Arc<Table>) -> Self {
        Self { buffer, table }
    }

    /// A record for a nested level over the same buffer.
    pub(crate) fn child(&self, table: &Arc<Table>) -> Self {
        Self {
            buffer: self.buffer.clone(),
            table: Arc::clone(table),
        }
    }

    /// The shared byte source.
    #[must_use]
    pub fn buffer(&self) -> &S {
        &self.buffer
    }

    /// This level's descriptor table.
    #[must_use]
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// A lazy view over this record.
    #[must_use]
    pub fn view(&self) -> View<S> {
        View::new(self.clone())
    }

    /// Turns this record into a lazy view.
    #[must_use]
    pub fn into_view(self) -> View<S> {
        View::new(self)
    }
}

/// The result of an encode call: the root record and how much of the buffer
/// was used.
#[derive(Debug, Clone)]
pub struct Encoded {
    root: Record,
    written: usize,
}

impl Encoded {
    pub(crate) fn new(root: Record, written: usize) -> Self {
        Self { root, written }
    }

    /// The root record.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.root
    }

    /// The root descriptor table.
    #[must_use]
    pub fn table(&self) -> &Arc<Table> {
        self.root.table()
    }

    /// A lazy view over the root record.
    #[must_use]
    pub fn view(&self) -> View {
        self.root.view()
    }

    /// Turns the result into a lazy view over the root record.
    #[must_use]
    pub fn into_view(self) -> View {
        self.root.into_view()
    }

    /// A view reading the same layout from another byte source.
    ///
    /// `source` must hold the bytes this call encoded at the same offsets,
    /// e.g. a copy of [`bytes`](Self::bytes) or the buffer wrapped in
    /// instrumentation. Reads past its end fail per field with
    /// [`DecodeError::OutOfBounds`](crate::DecodeError::OutOfBounds).
    #[must_use]
    pub fn view_over<T: ByteSource>(&self, source: T) -> View<T> {
        Record::new(source, Arc::clone(self.root.table())).into_view()
    }

    /// Bytes the encoder wrote.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Bytes allocated up front. Never less than [`written`](Self::written).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.root.buffer().len()
    }

    /// The written prefix of the buffer.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.root.buffer()[..self.written]
    }
}
