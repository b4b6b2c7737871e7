use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::utils::{encode, quickcheck_tests, reader};
use crate::{Map, TokenRead, TokenWrite, Value};

/// Property: any value written through `json_value` reads back unchanged
/// through `read_value`, and the cursor ends with nothing left over.
#[test]
fn value_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let bytes = encode(|w| {
            w.begin_array()?;
            w.json_value(&value)?;
            w.end_array()
        });

        let mut r = reader(&bytes);
        r.begin_array().unwrap();
        let decoded = r.read_value().unwrap();
        let exhausted = !r.has_next_element().unwrap();
        r.end_array().unwrap();
        decoded == value && exhausted && r.depth() == 0
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: the declared array header equals the number of values written
/// between `begin_array` and `end_array`, and pull iteration visits exactly
/// that many elements whatever they contain.
#[test]
fn header_count_matches_values_written() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(items: Vec<Value>) -> bool {
        let bytes = encode(|w| {
            w.begin_array()?;
            for item in &items {
                w.json_value(item)?;
            }
            w.end_array()
        });

        let header = rmp::decode::read_array_len(&mut &bytes[..]).unwrap();

        let mut r = reader(&bytes);
        r.begin_array().unwrap();
        let mut visited = 0;
        while r.has_next_element().unwrap() {
            r.skip_value().unwrap();
            visited += 1;
        }
        r.end_array().unwrap();

        header as usize == items.len() && visited == items.len()
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<Value>) -> bool);
}

/// Property: pair count for objects, keyed by arbitrary strings.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn object_pair_count_matches_fields(map: Map) -> bool {
    let bytes = encode(|w| w.json_value(&Value::Object(map.clone())));

    let mut r = reader(&bytes);
    r.begin_object().unwrap();
    let mut keys = Vec::new();
    while r.has_next_field().unwrap() {
        keys.push(r.next_field().unwrap());
        r.skip_value().unwrap();
    }
    r.end_object().unwrap();

    keys.iter().eq(map.keys())
}

/// Property: `Value::kind` names the wire category the reader sees.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn value_kind_matches_wire_kind(value: Value) -> bool {
    let bytes = encode(|w| {
        w.begin_array()?;
        w.json_value(&value)?;
        w.end_array()
    });

    let mut r = reader(&bytes);
    r.begin_array().unwrap();
    r.peek_kind().unwrap() == Some(value.kind())
}
