use quickcheck::QuickCheck;

use super::{arbitrary::Document, test_count};
use crate::{EncodeOptions, Encoder, SizeEstimate, estimate, estimate_with};

/// Property: no two sibling descriptors overlap and nothing points outside
/// the buffer.
#[test]
fn offsets_disjoint_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> bool {
        let encoded = Encoder::default().encode(&doc.0).unwrap();
        encoded.table().is_sound(encoded.capacity())
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Document) -> bool);
}

/// Property: the exact estimate matches the bytes written and the
/// conservative one never falls below it.
#[test]
fn estimate_bounds_written_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> bool {
        let exact = estimate(&doc.0);
        let conservative = estimate_with(&doc.0, SizeEstimate::Conservative);

        let written = Encoder::default().encode(&doc.0).unwrap().written();
        let loose = Encoder::new(EncodeOptions {
            size_estimate: SizeEstimate::Conservative,
            ..Default::default()
        })
        .encode(&doc.0)
        .unwrap();

        exact == written
            && conservative >= exact
            && loose.capacity() == conservative
            && loose.written() == written
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Document) -> bool);
}
