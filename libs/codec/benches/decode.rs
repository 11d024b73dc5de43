//! Decode hot-path benchmark: registry dispatch vs. generic fallback.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lattice_codec::{generic_registry, TypeIdentifier};
use serde_json::json;

fn bench_decode(c: &mut Criterion) {
    let registry = generic_registry();
    let raw = json!({
        "header": {
            "src": "controller.kitchen",
            "dst": "aggregator.main",
            "message_id": "m-1",
            "message_type": "heartbeat.b"
        },
        "payload": { "sequence": 1, "uptime_s": 60 }
    })
    .to_string();

    let registered = TypeIdentifier::new("envelope.b");
    c.bench_function("decode_registered", |b| {
        b.iter(|| registry.decode(black_box(&registered), black_box(&raw)))
    });

    let unregistered = TypeIdentifier::new("vendor.custom");
    c.bench_function("decode_fallback", |b| {
        b.iter(|| registry.decode(black_box(&unregistered), black_box(&raw)))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
