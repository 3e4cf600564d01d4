#![allow(missing_docs)]

mod common;

use common::{ARRAYS, SAMPLE, from_json};
use jsonlazy::{EncodeOptions, Encoder, SizeEstimate};

#[test]
fn snapshot_nested_object_layout() {
    let encoded = Encoder::default().encode(&from_json(SAMPLE)).unwrap();

    insta::assert_snapshot!(encoded.table(), @r#"
    object 0..17
      "a": number @0+8
      "b": boolean @8+1
      "c": string @9+2
      "d": null @11+0
      "e": object 11..17
        "f": string @11+6
    "#);
    assert_eq!(encoded.bytes(), b"\0\0\0\0\0\x40\x45\x40\x01hinested");
    assert_eq!(encoded.capacity(), 17);
}

#[test]
fn snapshot_array_layout() {
    let encoded = Encoder::default().encode(&from_json(ARRAYS)).unwrap();

    insta::assert_snapshot!(encoded.table(), @r#"
    object 0..17
      "arr": array 0..17
        0: number @0+8
        1: number @8+8
        2: object 16..17
          "x": string @16+1
    "#);
}

#[test]
fn snapshot_conservative_slack() {
    let encoded = Encoder::new(EncodeOptions {
        size_estimate: SizeEstimate::Conservative,
        ..Default::default()
    })
    .encode(&from_json(SAMPLE))
    .unwrap();

    // Same layout; only the allocation grows.
    insta::assert_snapshot!(encoded.table(), @r#"
    object 0..17
      "a": number @0+8
      "b": boolean @8+1
      "c": string @9+2
      "d": null @11+0
      "e": object 11..17
        "f": string @11+6
    "#);
    assert_eq!(encoded.written(), 17);
    assert_eq!(encoded.capacity(), 8 + 4 + 2 * 4 + 6 * 4);
}
