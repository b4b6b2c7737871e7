use super::utils::{encode, reader};
use crate::{Token, TokenRead, TokenWrite, Value};

/// `{"a": [1, {"b": 2}], "c": 3}`
fn write_nested_document<W: TokenWrite>(w: &mut W) -> crate::Result<()> {
    w.begin_object()?;
    w.name("a")?;
    w.value_str("a")?;
    w.begin_array()?;
    w.value_i32(1)?;
    w.begin_object()?;
    w.name("b")?;
    w.value_str("b")?;
    w.value_i32(2)?;
    w.end_object()?;
    w.end_array()?;
    w.name("c")?;
    w.value_str("c")?;
    w.value_i32(3)?;
    w.end_object()
}

#[test]
fn nested_document_bytes() {
    let bytes = encode(write_nested_document);
    assert_eq!(
        bytes,
        [
            0x82, 0xa1, b'a', 0x92, 0x01, 0x81, 0xa1, b'b', 0x02, 0xa1, b'c', 0x03
        ]
    );
}

#[test]
fn outer_object_reports_exactly_two_fields() {
    let bytes = encode(write_nested_document);
    let mut r = reader(&bytes);

    r.begin_object().unwrap();
    let mut seen = Vec::new();
    while r.has_next_field().unwrap() {
        let key = r.next_field().unwrap();
        match key.as_str() {
            "a" => {
                r.begin_array().unwrap();
                assert!(r.has_next_element().unwrap());
                assert_eq!(r.read_int().unwrap(), 1);
                assert!(r.has_next_element().unwrap());
                r.begin_object().unwrap();
                while r.has_next_field().unwrap() {
                    assert_eq!(r.next_field().unwrap(), "b");
                    assert_eq!(r.read_int().unwrap(), 2);
                }
                r.end_object().unwrap();
                assert!(!r.has_next_element().unwrap());
                r.end_array().unwrap();
            }
            "c" => assert_eq!(r.read_int().unwrap(), 3),
            other => panic!("unexpected field {other}"),
        }
        seen.push(key);
    }
    r.end_object().unwrap();

    assert_eq!(seen, ["a", "c"]);
    assert_eq!(r.depth(), 0);
}

#[test]
fn outer_count_survives_skipping_nested_content() {
    let bytes = encode(write_nested_document);
    let mut r = reader(&bytes);

    r.begin_object().unwrap();
    let mut fields = 0;
    while r.has_next_field().unwrap() {
        r.next_field().unwrap();
        r.skip_value().unwrap();
        fields += 1;
    }
    r.end_object().unwrap();
    assert_eq!(fields, 2);
}

#[test]
fn deferred_write_preserves_sibling_and_child_order() {
    // [1, [2, 3], 4]
    let bytes = encode(|w| {
        w.begin_array()?;
        w.value_i32(1)?;
        w.begin_array()?;
        w.value_i32(2)?;
        w.value_i32(3)?;
        w.end_array()?;
        w.value_i32(4)?;
        w.end_array()
    });
    assert_eq!(bytes, [0x93, 0x01, 0x92, 0x02, 0x03, 0x04]);

    let mut r = reader(&bytes);
    r.begin_array().unwrap();
    let value = Value::Array(vec![
        r.read_value().unwrap(),
        r.read_value().unwrap(),
        r.read_value().unwrap(),
    ]);
    assert!(!r.has_next_element().unwrap());
    r.end_array().unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            1.into(),
            Value::Array(vec![2.into(), 3.into()]),
            4.into()
        ])
    );
}

#[test]
fn deeply_nested_arrays_round_trip() {
    const DEPTH: usize = 64;
    let bytes = encode(|w| {
        for _ in 0..DEPTH {
            w.begin_array()?;
        }
        w.value_str("core")?;
        for _ in 0..DEPTH {
            w.end_array()?;
        }
        Ok(())
    });

    let mut r = reader(&bytes);
    for _ in 0..DEPTH {
        r.begin_array().unwrap();
    }
    assert_eq!(r.depth(), DEPTH);
    assert_eq!(r.read_string().unwrap(), "core");
    for _ in 0..DEPTH {
        assert!(!r.has_next_element().unwrap());
        r.end_array().unwrap();
    }
    assert_eq!(r.current_token(), Some(Token::String));
}

#[test]
fn siblings_after_nested_objects_are_still_visible() {
    // [{"x": 1}, {"y": [true]}, "tail"]
    let bytes = encode(|w| {
        w.begin_array()?;
        w.begin_object()?;
        w.value_str("x")?;
        w.value_i32(1)?;
        w.end_object()?;
        w.begin_object()?;
        w.value_str("y")?;
        w.begin_array()?;
        w.value_bool(true)?;
        w.end_array()?;
        w.end_object()?;
        w.value_str("tail")?;
        w.end_array()
    });

    let mut r = reader(&bytes);
    r.begin_array().unwrap();
    let mut elements = 0;
    while r.has_next_element().unwrap() {
        match r.peek_kind().unwrap() {
            Some(crate::ValueKind::Map) => {
                r.begin_object().unwrap();
                while r.has_next_field().unwrap() {
                    r.next_field().unwrap();
                    r.skip_value().unwrap();
                }
                r.end_object().unwrap();
            }
            _ => assert_eq!(r.read_string().unwrap(), "tail"),
        }
        elements += 1;
    }
    r.end_array().unwrap();
    assert_eq!(elements, 3);
}
