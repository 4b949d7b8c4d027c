//! Criterion micro-benchmarks for list mutation, lookup and compaction.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use slotlist::SlotList;
use slotlist_bench::{filled, scattered};

const CAPACITY: usize = 10_000;

/// Benchmark: fill an empty 10K list from both ends.
fn bench_fill_10k(c: &mut Criterion) {
    c.bench_function("fill_10k", |b| {
        b.iter_batched(
            || SlotList::with_capacity(CAPACITY).unwrap(),
            |mut list| {
                for v in 0..CAPACITY as u64 / 2 {
                    list.push_back(v).unwrap();
                    list.push_front(v).unwrap();
                }
                black_box(list.len())
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: remove the head and push it back, exercising free-chain reuse.
fn bench_remove_reinsert(c: &mut Criterion) {
    let mut list = filled(CAPACITY);
    c.bench_function("remove_reinsert", |b| {
        b.iter(|| {
            let v = list.pop_front().unwrap();
            black_box(list.push_back(v).unwrap());
        });
    });
}

/// Benchmark: positional lookup at the middle of a scattered list.
fn bench_handle_at_middle(c: &mut Criterion) {
    let list = scattered(CAPACITY, 7, 20_000);
    let middle = list.len() / 2;
    c.bench_function("handle_at_middle", |b| {
        b.iter(|| black_box(list.handle_at(black_box(middle))));
    });
}

/// Benchmark: search for an absent payload from each end.
fn bench_find_miss(c: &mut Criterion) {
    let list = scattered(CAPACITY, 11, 20_000);
    c.bench_function("find_first_miss", |b| {
        b.iter(|| black_box(list.find_first(&u32::MAX, |a, b| a == b)));
    });
    c.bench_function("find_last_miss", |b| {
        b.iter(|| black_box(list.find_last(&u32::MAX, |a, b| a == b)));
    });
}

/// Benchmark: compact a scattered list.
fn bench_compact(c: &mut Criterion) {
    let base = scattered(CAPACITY, 3, 20_000);
    c.bench_function("compact_scattered", |b| {
        b.iter_batched(
            || {
                let mut list = SlotList::with_capacity(CAPACITY).unwrap();
                for &v in &base {
                    list.push_front(v).unwrap();
                }
                list
            },
            |mut list| {
                list.compact();
                black_box(list.len())
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: full integrity check on a full list.
fn bench_check_integrity(c: &mut Criterion) {
    let list = filled(CAPACITY);
    c.bench_function("check_integrity_10k", |b| {
        b.iter(|| black_box(list.check_integrity().is_ok()));
    });
}

criterion_group!(
    benches,
    bench_fill_10k,
    bench_remove_reinsert,
    bench_handle_at_middle,
    bench_find_miss,
    bench_compact,
    bench_check_integrity
);
criterion_main!(benches);
