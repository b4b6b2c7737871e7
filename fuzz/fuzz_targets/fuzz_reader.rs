#![no_main]
use libfuzzer_sys::fuzz_target;
use packmodem::{MsgpackAdapter, TokenRead, TokenWrite, Value};

fn encode(adapter: &MsgpackAdapter, value: &Value) -> Option<Vec<u8>> {
    let mut writer = adapter.bytes_writer();
    writer.begin_array().ok()?;
    // extensions have no token-level encoding
    writer.json_value(value).ok()?;
    writer.end_array().ok()?;
    Some(writer.into_result())
}

fn reader(data: &[u8]) {
    let adapter = MsgpackAdapter::new();

    let mut values = adapter.reader_from_slice(data);
    let Ok(value) = values.read_value() else {
        return;
    };

    // skipping a value must cover exactly the bytes reading it did
    let mut skipper = adapter.reader_from_slice(data);
    skipper
        .skip_value()
        .expect("skip_value failed on a value read_value accepted");
    assert_eq!(skipper.offset(), values.offset());

    // NaN payloads defeat value equality, so compare re-encoded bytes
    let Some(first) = encode(&adapter, &value) else {
        return;
    };
    let mut again = adapter.reader_from_slice(&first);
    again.begin_array().expect("begin_array on own output");
    let decoded = again.read_value().expect("read_value on own output");
    assert!(!again.has_next_element().expect("has_next_element"));
    again.end_array().expect("end_array on own output");

    let second = encode(&adapter, &decoded).expect("re-encode decoded value");
    assert_eq!(first, second);
}

fuzz_target!(|data: &[u8]| reader(data));
