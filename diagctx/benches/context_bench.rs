//! Benchmarks for diagnostic context operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use diagctx::context::ContextSlot;
use diagctx::scope::{InheritedContext, Mdc};

fn slot_benchmark(c: &mut Criterion) {
    c.bench_function("slot_put_consecutive", |b| {
        let mut slot = ContextSlot::new();
        b.iter(|| {
            slot.put(black_box("trace_id"), black_box("t1")).unwrap();
        });
    });

    c.bench_function("slot_put_after_read", |b| {
        let mut slot = ContextSlot::new();
        slot.set_context_map([("trace_id", "t1"), ("span_id", "s1"), ("tenant", "acme")]);
        b.iter(|| {
            black_box(slot.get("trace_id"));
            slot.put(black_box("span_id"), black_box("s2")).unwrap();
        });
    });

    c.bench_function("slot_inherit", |b| {
        let mut slot = ContextSlot::new();
        slot.set_context_map([("trace_id", "t1"), ("span_id", "s1")]);
        b.iter(|| black_box(slot.inherit()));
    });
}

fn mdc_benchmark(c: &mut Criterion) {
    Mdc::set_context_map([("trace_id", "t1"), ("span_id", "s1")]);

    c.bench_function("mdc_get", |b| {
        b.iter(|| black_box(Mdc::get(black_box("trace_id"))));
    });

    c.bench_function("mdc_capture", |b| {
        b.iter(|| black_box(InheritedContext::capture()));
    });

    Mdc::clear();
}

criterion_group!(benches, slot_benchmark, mdc_benchmark);
criterion_main!(benches);
