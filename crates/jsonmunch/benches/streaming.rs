//! Benchmark – full pull traversal and selective key lookup.
#![allow(missing_docs)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jsonmunch::{parse, JsonKind, JsonValue, Source};

/// Produce a deterministic record-batch document of `records` entries, the
/// log-shaped workload the parser targets: short integers, small strings,
/// the occasional float.
fn make_json_payload(records: usize) -> String {
    let mut out = String::from("[");
    for i in 0..records {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!(
            r#"{{"id":{i},"name":"user-{i}","active":{},"score":{}.5,"tags":["a","b\n{i}"]}}"#,
            i % 2 == 0,
            i % 97,
        ));
    }
    out.push(']');
    out
}

/// Walk everything, counting scalars so Criterion can black-box the work.
fn drain<S: Source>(v: &mut JsonValue<S>) -> usize {
    let mut seen = 0;
    match v.kind() {
        JsonKind::Null | JsonKind::Bool | JsonKind::Number => seen += 1,
        JsonKind::String => {
            let mut buf = [0u8; 64];
            while v.read(&mut buf).unwrap_or(0) > 0 {}
            seen += 1;
        }
        JsonKind::Array | JsonKind::Object => {
            while let Some(mut child) = v.next_value().ok().flatten() {
                seen += drain(&mut child);
            }
        }
    }
    seen
}

fn bench_traverse(c: &mut Criterion) {
    let payload = make_json_payload(5_000);
    let mut group = c.benchmark_group("traverse");
    group.measurement_time(Duration::from_secs(10));
    group.throughput(criterion::Throughput::Bytes(payload.len() as u64));
    for window in [256usize, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &w| {
            b.iter(|| {
                let mut root = parse(black_box(payload.as_bytes()), w).unwrap();
                black_box(drain(&mut root))
            });
        });
    }
    group.finish();
}

fn bench_find_key(c: &mut Criterion) {
    let payload = make_json_payload(5_000);
    let mut group = c.benchmark_group("find_key");
    group.throughput(criterion::Throughput::Bytes(payload.len() as u64));
    for window in [256usize, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &w| {
            b.iter(|| {
                let mut root = parse(black_box(payload.as_bytes()), w).unwrap();
                let mut hits = 0usize;
                while let Some(mut record) = root.next_value().unwrap() {
                    if let Some((_, val)) = record.find_key(&["score", "id"]).unwrap() {
                        black_box(val.number().unwrap());
                        hits += 1;
                    }
                    record.close().unwrap();
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_traverse, bench_find_key);
criterion_main!(benches);
