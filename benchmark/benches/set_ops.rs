// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Single-threaded operation cost of each set strategy.
//!
//! Measures the uncontended price of the locking discipline on a list of fixed size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lockset_core::{ConcurrentSet, Key, Strategy};

const LIST_SIZES: [Key; 3] = [16, 256, 2048];

/// A set holding every even key below `2 * size`.
fn prefilled(strategy: Strategy, size: Key) -> Box<dyn ConcurrentSet> {
    let set = strategy.build();
    for key in (0..size).map(|k| k * 2) {
        set.insert(key);
    }
    set
}

fn bench_member(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_member");

    for strategy in Strategy::ALL {
        for size in LIST_SIZES {
            let set = prefilled(strategy, size);
            // Middle of the list: present and absent neighbours.
            let hit = size;
            let miss = size + 1;
            group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |b, _| {
                b.iter(|| {
                    black_box(set.member(black_box(hit)));
                    black_box(set.member(black_box(miss)));
                });
            });
        }
    }

    group.finish();
}

fn bench_insert_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_insert_delete");

    for strategy in Strategy::ALL {
        for size in LIST_SIZES {
            let set = prefilled(strategy, size);
            let key = size + 1;
            group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |b, _| {
                b.iter(|| {
                    assert!(set.insert(black_box(key)));
                    assert!(set.delete(black_box(key)));
                });
            });
        }
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_snapshot");

    for strategy in Strategy::ALL {
        let set = prefilled(strategy, 1024);
        group.bench_function(strategy.name(), |b| {
            b.iter(|| black_box(set.snapshot()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_member, bench_insert_delete, bench_snapshot);

criterion_main!(benches);
