//! Instrumented reads: decoding one field must touch only that field's bytes.
use core::ops::Range;
use std::sync::{Arc, Mutex};

use quickcheck::QuickCheck;

use super::{arbitrary::Document, test_count};
use crate::{ByteSource, Encoded, Encoder, Map, SharedBuffer, Value, View};

/// A byte source that logs every range read from it.
#[derive(Clone)]
struct Tracked {
    bytes: SharedBuffer,
    reads: Arc<Mutex<Vec<Range<usize>>>>,
}

impl Tracked {
    fn new(encoded: &Encoded) -> Self {
        Self {
            bytes: Arc::clone(encoded.record().buffer()),
            reads: Arc::default(),
        }
    }

    fn take(&self) -> Vec<Range<usize>> {
        core::mem::take(&mut *self.reads.lock().unwrap())
    }
}

impl ByteSource for Tracked {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, range: Range<usize>) -> Option<&[u8]> {
        self.reads.lock().unwrap().push(range.clone());
        self.bytes.get(range)
    }
}

fn tracked_view(doc: &Value) -> (View<Tracked>, Tracked) {
    let encoded = Encoder::default().encode(doc).unwrap();
    let source = Tracked::new(&encoded);
    (encoded.view_over(source.clone()), source)
}

#[test]
fn reads_only_the_requested_field() {
    let mut inner = Map::new();
    inner.insert("f".into(), "nested".into());
    let mut doc = Map::new();
    doc.insert("a".into(), Value::Number(42.5));
    doc.insert("b".into(), Value::Boolean(true));
    doc.insert("c".into(), "hi".into());
    doc.insert("d".into(), Value::Null);
    doc.insert("e".into(), Value::Object(inner));
    let (view, source) = tracked_view(&Value::Object(doc));

    assert!(source.take().is_empty());

    view.get("c").unwrap();
    assert_eq!(source.take(), [9..11]);

    view.get("a").unwrap();
    assert_eq!(source.take(), [0..8]);

    view.get("d").unwrap();
    view.get("missing").unwrap();
    assert!(source.take().is_empty());

    // Opening a nested object reads nothing until one of its members is asked for.
    let e = view.get("e").unwrap().unwrap().into_view().unwrap();
    assert!(source.take().is_empty());
    e.get("f").unwrap();
    assert_eq!(source.take(), [11..17]);
}

/// Property: each `get` reads at most one range, and that range is exactly
/// the field's own.
#[test]
fn get_reads_only_its_own_range_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> bool {
        let (view, source) = tracked_view(&doc.0);
        view.keys().all(|key| {
            let field = view.descriptor(key).unwrap();
            view.get(key).unwrap();
            let reads = source.take();
            match field.tag() {
                crate::TypeTag::Null | crate::TypeTag::Object | crate::TypeTag::Array => {
                    reads.is_empty()
                }
                _ => reads == [field.range()],
            }
        })
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Document) -> bool);
}
