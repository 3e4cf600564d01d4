use core::ops::Range;
use std::sync::Arc;

/// The buffer type produced by the encoder: one immutable allocation shared
/// by every record and view derived from a single encode call.
pub type SharedBuffer = Arc<[u8]>;

/// Somewhere a view can read byte ranges from.
///
/// Every decode goes through [`read`](ByteSource::read), one call per field,
/// covering exactly that field's range. Cloning a source must be cheap and
/// must not copy the bytes; views clone their source for every nested level.
pub trait ByteSource: Clone {
    /// Total bytes available.
    fn len(&self) -> usize;

    /// Whether the source holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bytes in `range`, or `None` if it runs past the end.
    fn read(&self, range: Range<usize>) -> Option<&[u8]>;
}

impl ByteSource for Arc<[u8]> {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read(&self, range: Range<usize>) -> Option<&[u8]> {
        self.get(range)
    }
}

impl ByteSource for &[u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read(&self, range: Range<usize>) -> Option<&[u8]> {
        self.get(range)
    }
}
