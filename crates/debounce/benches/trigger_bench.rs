//! Trigger hot-path benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use debounce::timer::Callback;
use debounce::{Debouncer, TimerHost, TokioTimer};
use std::time::Duration;

/// Host that drops every callback, isolating the invoker's own bookkeeping
struct NullTimer;

impl TimerHost for NullTimer {
    type Handle = ();

    fn schedule(&self, _delay: Duration, _callback: Callback) -> Self::Handle {}

    fn cancel(&self, _handle: Self::Handle) {}
}

fn bench_trigger(c: &mut Criterion) {
    let debouncer = Debouncer::with_host(
        |query: String| {
            black_box(query);
        },
        Duration::from_millis(300),
        NullTimer,
    );

    c.bench_function("trigger_null_host", |b| {
        b.iter(|| debouncer.trigger(black_box(String::from("goat"))));
    });
}

fn bench_trigger_tokio(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .unwrap();

    let debouncer = Debouncer::with_host(
        |n: u64| {
            black_box(n);
        },
        Duration::from_millis(300),
        TokioTimer::new(runtime.handle().clone()),
    );

    c.bench_function("trigger_tokio_host", |b| {
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            debouncer.trigger(black_box(n));
        });
    });

    debouncer.cancel();
}

criterion_group!(benches, bench_trigger, bench_trigger_tokio);
criterion_main!(benches);
