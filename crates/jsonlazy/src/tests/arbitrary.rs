use quickcheck::{Arbitrary, Gen};

use crate::{Map, Value};

/// Any encodable document: an object or array at the root.
#[derive(Debug, Clone)]
pub(crate) struct Document(pub(crate) Value);

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        gen_value(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Value::Array(items) => Box::new(items.shrink().map(Value::Array)),
            Value::Object(map) => {
                let pairs: Vec<(String, Value)> =
                    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                Box::new(
                    pairs
                        .shrink()
                        .map(|pairs| Value::Object(pairs.into_iter().collect())),
                )
            }
            Value::String(s) => Box::new(s.shrink().map(Value::String)),
            _ => quickcheck::empty_shrinker(),
        }
    }
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        Document(if bool::arbitrary(g) {
            gen_array(g, depth)
        } else {
            gen_object(g, depth)
        })
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.0
                .shrink()
                .filter(|v| v.is_array() || v.is_object())
                .map(Document),
        )
    }
}

fn gen_scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 4 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        // Includes NaN, infinities and signed zero; all must survive bit-exact.
        2 => Value::Number(f64::arbitrary(g)),
        _ => Value::String(String::arbitrary(g)),
    }
}

fn gen_array(g: &mut Gen, depth: usize) -> Value {
    let len = usize::arbitrary(g) % 4;
    Value::Array((0..len).map(|_| gen_value(g, depth.saturating_sub(1))).collect())
}

fn gen_object(g: &mut Gen, depth: usize) -> Value {
    let len = usize::arbitrary(g) % 4;
    let mut map = Map::new();
    for _ in 0..len {
        map.insert(String::arbitrary(g), gen_value(g, depth.saturating_sub(1)));
    }
    Value::Object(map)
}

fn gen_value(g: &mut Gen, depth: usize) -> Value {
    if depth == 0 {
        return gen_scalar(g);
    }
    match usize::arbitrary(g) % 6 {
        0..4 => gen_scalar(g),
        4 => gen_array(g, depth),
        _ => gen_object(g, depth),
    }
}
