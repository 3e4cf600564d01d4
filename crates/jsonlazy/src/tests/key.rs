use rstest::rstest;

use crate::{FieldKey, Key};

#[rstest]
#[case::zero(Key::from(0u8), Key::Index(0))]
#[case::signed(Key::from(7i64), Key::Index(7))]
#[case::negative(Key::from(-1i32), Key::Index(usize::MAX))]
#[case::name(Key::from("x"), Key::Name("x"))]
fn keys_from_integers_and_names(#[case] key: Key<'_>, #[case] expected: Key<'_>) {
    assert_eq!(key, expected);
}

#[test]
fn field_keys_display_like_paths() {
    assert_eq!(FieldKey::from("a\"b").to_string(), r#""a\"b""#);
    assert_eq!(FieldKey::from(3).to_string(), "3");
    assert_eq!(FieldKey::from("n").as_name(), Some("n"));
    assert_eq!(FieldKey::from(3).as_index(), Some(3));
    assert_eq!(Key::from(&FieldKey::from("n")), Key::Name("n"));
}

#[cfg(feature = "serde")]
mod serde_round_trip {
    use crate::FieldKey;

    #[test]
    fn keys_serialize_as_plain_json() {
        let path = vec![FieldKey::from("foo"), FieldKey::from(0)];
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["foo",0]"#);
        assert_eq!(serde_json::from_str::<Vec<FieldKey>>(&json).unwrap(), path);
    }

    #[test]
    fn negative_indices_are_rejected() {
        let err = serde_json::from_str::<FieldKey>("-1").unwrap_err();
        assert!(err.to_string().contains("non-negative index"), "{err}");
    }

    #[test]
    fn non_key_values_are_rejected() {
        for json in ["1.5", "true", "null", "[0]"] {
            let err = serde_json::from_str::<FieldKey>(json).unwrap_err();
            assert!(err.to_string().contains("a string or unsigned integer"), "{json}: {err}");
        }
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn oversized_indices_are_rejected() {
        let err = serde_json::from_str::<FieldKey>(&u64::MAX.to_string()).unwrap_err();
        assert!(err.to_string().contains("a usize index"), "{err}");
    }
}
