//! Sequence benchmarks
//!
//! - Single-thread cost of each operation
//! - Two threads hammering one sequence
//! - Padded vs unpadded neighbours (false sharing)
//!
//! Run: cargo bench --bench bench_sequence

use criterion::{ criterion_group, criterion_main, Criterion, Throughput };
use std::hint::black_box;
use std::sync::atomic::{ AtomicI64, Ordering };
use std::sync::{ Arc, Barrier };
use std::thread;
use std::time::{ Duration, Instant };

use kaos_sequence::Sequence;

const CONTENDED_OPS: u64 = 1_000_000;

// ============================================================================
// Uncontended
// ============================================================================

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_single");
    group.throughput(Throughput::Elements(1));

    let seq = Sequence::new(0);
    group.bench_function("get", |b| b.iter(|| black_box(seq.get())));
    group.bench_function("set", |b| b.iter(|| seq.set(black_box(1))));
    group.bench_function("set_volatile", |b| b.iter(|| seq.set_volatile(black_box(1))));
    group.bench_function("increment_and_get", |b| b.iter(|| black_box(seq.increment_and_get())));
    group.bench_function("compare_and_set", |b| {
        b.iter(|| {
            let current = seq.get();
            black_box(seq.compare_and_set(current, current + 1))
        })
    });

    group.finish();
}

// ============================================================================
// Contended
// ============================================================================

/// Two threads, `ops` increments each. Returns the wall time.
fn run_pair<A, B>(ops: u64, a: A, b: B) -> Duration
    where A: Fn() + Send + Sync, B: Fn() + Send + Sync
{
    let barrier = Barrier::new(2);
    thread::scope(|s| {
        let other = s.spawn(|| {
            barrier.wait();
            for _ in 0..ops {
                b();
            }
        });
        barrier.wait();
        let start = Instant::now();
        for _ in 0..ops {
            a();
        }
        other.join().unwrap();
        start.elapsed()
    })
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_contended");
    group.throughput(Throughput::Elements(CONTENDED_OPS * 2));
    group.sample_size(10);

    group.bench_function("increment_same_sequence", |b| {
        b.iter_custom(|iters| {
            let seq = Arc::new(Sequence::new(0));
            (0..iters)
                .map(|_| {
                    run_pair(
                        CONTENDED_OPS,
                        || {
                            seq.increment_and_get();
                        },
                        || {
                            seq.increment_and_get();
                        }
                    )
                })
                .sum()
        })
    });

    group.finish();
}

// ============================================================================
// False sharing
// ============================================================================

/// Two counters on the same cache line.
struct Unpadded {
    a: AtomicI64,
    b: AtomicI64,
}

fn bench_false_sharing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_false_sharing");
    group.throughput(Throughput::Elements(CONTENDED_OPS * 2));
    group.sample_size(10);

    group.bench_function("padded", |b| {
        b.iter_custom(|iters| {
            let pair = [Sequence::new(0), Sequence::new(0)];
            (0..iters)
                .map(|_| {
                    run_pair(
                        CONTENDED_OPS,
                        || {
                            pair[0].increment_and_get();
                        },
                        || {
                            pair[1].increment_and_get();
                        }
                    )
                })
                .sum()
        })
    });

    group.bench_function("unpadded", |b| {
        b.iter_custom(|iters| {
            let pair = Unpadded { a: AtomicI64::new(0), b: AtomicI64::new(0) };
            (0..iters)
                .map(|_| {
                    run_pair(
                        CONTENDED_OPS,
                        || {
                            pair.a.fetch_add(1, Ordering::SeqCst);
                        },
                        || {
                            pair.b.fetch_add(1, Ordering::SeqCst);
                        }
                    )
                })
                .sum()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_contended, bench_false_sharing);
criterion_main!(benches);
