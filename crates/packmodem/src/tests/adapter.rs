use crate::{AdapterOptions, Error, MsgpackAdapter, TokenRead, TokenWrite};

#[test]
fn default_options() {
    let options = MsgpackAdapter::new().options();
    assert!(options.serialize_nulls);
    assert!(options.serialize_empty);
    assert!(!options.fail_on_unknown);
    assert_eq!(options, AdapterOptions::default());
}

#[test]
fn options_deserialize_with_defaults_for_missing_fields() {
    let options: AdapterOptions = serde_json::from_str(r#"{"fail_on_unknown": true}"#).unwrap();
    assert_eq!(
        options,
        AdapterOptions {
            fail_on_unknown: true,
            ..AdapterOptions::default()
        }
    );

    let text = serde_json::to_string(&options).unwrap();
    insta::assert_snapshot!(
        text,
        @r#"{"serialize_nulls":true,"serialize_empty":true,"fail_on_unknown":true}"#
    );
}

#[test]
fn writers_inherit_serialize_flags() {
    let adapter = MsgpackAdapter::with_options(AdapterOptions {
        serialize_nulls: false,
        serialize_empty: false,
        fail_on_unknown: false,
    });
    let writer = adapter.writer(Vec::new());
    assert!(!writer.serialize_nulls());
    assert!(!writer.serialize_empty());

    let buffered = adapter.buffered_writer();
    assert!(!buffered.serialize_nulls());
}

#[test]
fn readers_inherit_unknown_field_policy() {
    let strict = MsgpackAdapter::with_options(AdapterOptions {
        fail_on_unknown: true,
        ..AdapterOptions::default()
    });
    let bytes = [0x80];

    let mut reader = strict.reader(&bytes[..]);
    assert!(matches!(
        reader.unmapped_field("extra"),
        Err(Error::UnknownField { .. })
    ));

    let mut reader = MsgpackAdapter::new().reader_from_slice(&bytes);
    reader.unmapped_field("extra").unwrap();
}

#[test]
fn buffered_writer_exposes_a_byte_string() {
    let adapter = MsgpackAdapter::new();
    let mut writer = adapter.buffered_writer();
    writer.begin_array().unwrap();
    writer.value_str("hi").unwrap();
    writer.end_array().unwrap();

    assert_eq!(writer.result(), b"\x91\xa2hi".as_slice());
    let owned = writer.into_result();
    assert_eq!(owned, b"\x91\xa2hi".as_slice());
}

#[test]
fn bytes_writer_round_trips_through_reader() {
    let adapter = MsgpackAdapter::new();
    let mut writer = adapter.bytes_writer();
    writer.begin_object().unwrap();
    writer.value_str("n").unwrap();
    writer.value_i64(-7).unwrap();
    writer.end_object().unwrap();
    assert_eq!(writer.result(), &[0x81, 0xa1, b'n', 0xf9]);

    let bytes = writer.into_result();
    let mut reader = adapter.reader_from_slice(&bytes);
    reader.begin_object().unwrap();
    assert_eq!(reader.next_field().unwrap(), "n");
    assert_eq!(reader.read_long().unwrap(), -7);
    reader.end_object().unwrap();
}

#[test]
fn reader_from_str_reads_ascii_bytes() {
    // '\u{1}' is positive fixint 1, 'x' (0x78) is positive fixint 120
    let mut reader = MsgpackAdapter::new().reader_from_str("\u{1}x");
    assert_eq!(reader.read_int().unwrap(), 1);
    assert_eq!(reader.read_int().unwrap(), 120);
}

#[test]
fn properties_are_matched_by_name_and_position() {
    let names = MsgpackAdapter::new().properties(&["id", "name", "tags"]);
    assert_eq!(names.len(), 3);
    assert!(!names.is_empty());
    assert_eq!(names.get("name"), Some("name"));
    assert_eq!(names.get("missing"), None);
    assert_eq!(names.position("tags"), Some(2));
    assert_eq!(names.name_at(0), Some("id"));
    assert_eq!(names.name_at(3), None);
    assert_eq!(names.iter().collect::<Vec<_>>(), ["id", "name", "tags"]);
}
