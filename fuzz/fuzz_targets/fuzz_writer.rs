#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use packmodem::{MsgpackAdapter, MsgpackWriter, Result, TokenRead, TokenWrite};

#[derive(Arbitrary, Debug)]
enum Op {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    EmptyArray,
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Double(f64),
    Str(String),
    Bin(Vec<u8>),
}

fn apply(writer: &mut MsgpackWriter<Vec<u8>>, op: &Op) -> Result<()> {
    match op {
        Op::BeginArray => writer.begin_array(),
        Op::EndArray => writer.end_array(),
        Op::BeginObject => writer.begin_object(),
        Op::EndObject => writer.end_object(),
        Op::EmptyArray => writer.empty_array(),
        Op::Null => writer.null_value(),
        Op::Bool(v) => writer.value_bool(*v),
        Op::Int(v) => writer.value_i64(*v),
        Op::Uint(v) => writer.value_u64(*v),
        Op::Double(v) => writer.value_f64(*v),
        Op::Str(v) => writer.value_str(v),
        Op::Bin(v) => writer.value_binary(v),
    }
}

/// Any call sequence, rejected calls included, leaves the sink holding only
/// whole top-level values.
fn writer(ops: &[Op]) {
    let adapter = MsgpackAdapter::new();
    let mut writer = adapter.bytes_writer();
    let mut roots = 0usize;

    for op in ops {
        let depth = writer.depth();
        let entries = writer.pending_entries();
        let closes_root = depth == 1 && matches!(op, Op::EndArray | Op::EndObject);
        let root_scalar = depth == 0 && matches!(op, Op::EmptyArray);
        match apply(&mut writer, op) {
            Ok(()) if closes_root || root_scalar => roots += 1,
            Ok(()) => {}
            Err(_) => {
                assert_eq!(writer.depth(), depth);
                assert_eq!(writer.pending_entries(), entries);
            }
        }
    }

    let bytes = writer.into_result();
    let mut reader = adapter.reader_from_slice(&bytes);
    for _ in 0..roots {
        reader.skip_value().expect("emitted root is not well formed");
    }
    assert_eq!(reader.offset(), bytes.len() as u64);
}

fuzz_target!(|ops: Vec<Op>| writer(&ops));
