#![no_main]
use arbitrary::Arbitrary;
use jsonlazy::{
    EncodeError, EncodeOptions, Encoder, Map, SizeEstimate, Value, estimate, estimate_with,
};
use libfuzzer_sys::fuzz_target;

/// Fuzzer-shaped mirror of `Value`; map keys may repeat, as in real input.
#[derive(Debug, Arbitrary)]
enum Node {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Boolean(b) => Value::Boolean(b),
            Node::Number(n) => Value::Number(n),
            Node::String(s) => Value::String(s),
            Node::Array(items) => items.into_iter().map(Value::from).collect(),
            Node::Object(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map>(),
            ),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    conservative: bool,
    max_depth: Option<u8>,
    root: Node,
}

fuzz_target!(|input: Input| {
    let value = Value::from(input.root);
    let options = EncodeOptions {
        size_estimate: if input.conservative {
            SizeEstimate::Conservative
        } else {
            SizeEstimate::Exact
        },
        max_depth: input.max_depth.map(usize::from),
    };

    let encoded = match Encoder::new(options).encode(&value) {
        Ok(encoded) => encoded,
        Err(EncodeError::UnsupportedType { .. }) => {
            assert!(!value.is_array() && !value.is_object());
            return;
        }
        Err(EncodeError::DepthLimitExceeded { .. }) => return,
        Err(err) => panic!("unexpected encode failure: {err}"),
    };

    assert_eq!(encoded.written(), estimate(&value));
    assert_eq!(
        encoded.capacity(),
        estimate_with(&value, options.size_estimate)
    );
    assert!(encoded.table().is_sound(encoded.capacity()));

    let decoded = encoded.view().to_value().expect("own buffer decodes");
    assert!(decoded.bit_eq(&value), "{decoded} != {value}");
});
