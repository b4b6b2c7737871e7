//! Benchmark – `packmodem::MsgpackWriter` and `packmodem::MsgpackReader`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use packmodem::{Map, MsgpackAdapter, TokenRead, TokenWrite, Value};

/// A deterministic array of `records` small objects, each with a nested tag
/// list, so that the writer has to defer a container per record.
fn make_document(records: usize) -> Value {
    let items = (0..records)
        .map(|i| {
            let mut map = Map::new();
            map.insert("id".into(), Value::Integer(i64::try_from(i).unwrap()));
            map.insert("name".into(), format!("record-{i}").into());
            map.insert("ratio".into(), Value::Float(1.0 / (i as f64 + 1.0)));
            map.insert(
                "tags".into(),
                Value::Array(vec!["alpha".into(), "beta".into(), Value::Boolean(i % 2 == 0)]),
            );
            Value::Object(map)
        })
        .collect();
    Value::Array(items)
}

fn encode(value: &Value) -> Vec<u8> {
    let mut writer = MsgpackAdapter::new().bytes_writer();
    writer.json_value(value).expect("encode");
    writer.into_result()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for &records in &[10usize, 1_000, 10_000] {
        let document = make_document(records);
        let bytes = encode(&document);

        group.bench_with_input(BenchmarkId::new("write", records), &document, |b, doc| {
            b.iter(|| black_box(encode(black_box(doc))).len());
        });
        group.bench_with_input(BenchmarkId::new("read_value", records), &bytes, |b, bytes| {
            b.iter(|| {
                let mut reader = MsgpackAdapter::new().reader_from_slice(black_box(bytes));
                black_box(reader.read_value().expect("decode"))
            });
        });
        group.bench_with_input(BenchmarkId::new("skip_value", records), &bytes, |b, bytes| {
            b.iter(|| {
                let mut reader = MsgpackAdapter::new().reader_from_slice(black_box(bytes));
                reader.skip_value().expect("skip");
                black_box(reader.offset())
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_codec }
criterion_main!(benches);
