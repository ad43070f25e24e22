//! Benchmark suite for blockdeque operations.

use blockdeque::Deque;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::VecDeque;
use std::time::Duration;

const SIZES: [u64; 3] = [1_000, 10_000, 100_000];

fn filled(size: u64) -> Deque<u64> {
    (0..size).collect()
}

/// Benchmark appending to both ends of an empty deque.
fn push_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for size in SIZES.iter() {
        group.throughput(Throughput::Elements(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut deque = Deque::new();
                for i in 0..size {
                    if i % 2 == 0 {
                        deque.push_back(black_box(i));
                    } else {
                        deque.push_front(black_box(i));
                    }
                }
                deque
            });
        });
    }
    group.finish();
}

/// Benchmark random access with `at()` on a pre-populated deque.
fn at_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("at");

    for size in SIZES.iter() {
        let deque = filled(*size);

        group.throughput(Throughput::Elements(1_000));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                // A stride coprime to the size visits scattered indices.
                let mut index = 0;
                for _ in 0..1_000 {
                    index = (index + 7_919) % size;
                    let _ = black_box(deque.at(index as usize));
                }
            });
        });
    }
    group.finish();
}

/// Benchmark inserting into and erasing from the middle, compared with
/// `VecDeque`, which shifts elements on every call.
fn middle_insert_erase_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("middle_insert_erase");

    for size in SIZES.iter() {
        group.throughput(Throughput::Elements(1_000));

        let mut deque = filled(*size);
        group.bench_with_input(BenchmarkId::new("blockdeque", size), size, |b, &size| {
            b.iter(|| {
                let middle = (size / 2) as usize;
                for i in 0..500 {
                    deque.insert_at(middle, black_box(i)).unwrap();
                    let _ = black_box(deque.remove_at(middle));
                }
            });
        });

        let mut reference: VecDeque<u64> = (0..*size).collect();
        group.bench_with_input(BenchmarkId::new("vec_deque", size), size, |b, &size| {
            b.iter(|| {
                let middle = (size / 2) as usize;
                for i in 0..500 {
                    reference.insert(middle, black_box(i));
                    let _ = black_box(reference.remove(middle));
                }
            });
        });
    }
    group.finish();
}

/// Benchmark walking the whole deque with positions and with `iter()`.
fn traversal_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    let size = 100_000;
    let deque = filled(size);
    group.throughput(Throughput::Elements(size));

    group.bench_function("positions", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut pos = deque.begin();
            while pos != deque.end() {
                if let Ok(value) = deque.get(pos) {
                    sum = sum.wrapping_add(*value);
                }
                pos = match deque.next(pos) {
                    Ok(next) => next,
                    Err(_) => break,
                };
            }
            black_box(sum)
        });
    });

    group.bench_function("iter", |b| {
        b.iter(|| black_box(deque.iter().fold(0u64, |sum, v| sum.wrapping_add(*v))));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = push_benchmark, at_benchmark, middle_insert_erase_benchmark, traversal_benchmark
}

criterion_main!(benches);
