//! Benchmarks for the B-tree engine.
//!
//! Run with `cargo bench`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mwtree::BTree;

const N: i64 = 10_000;

/// Deterministic shuffle so every run inserts the same sequence.
fn scrambled_keys(n: i64) -> Vec<i64> {
    (0..n).map(|i| (i * 7_919) % n).collect()
}

fn bench_insert(c: &mut Criterion) {
    let keys = scrambled_keys(N);
    let mut group = c.benchmark_group("insert");

    for order in [3usize, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, &order| {
            b.iter(|| {
                let mut tree = BTree::new(order).unwrap();
                for &k in &keys {
                    tree.insert(k, k).unwrap();
                }
                black_box(tree.len())
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let keys = scrambled_keys(N);
    let mut group = c.benchmark_group("search");

    for order in [3usize, 16, 64] {
        let tree = BTree::build(order, keys.iter().map(|&k| (k, k))).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(order), &tree, |b, tree| {
            b.iter(|| {
                for k in (0..N).step_by(97) {
                    black_box(tree.get(&k));
                }
            });
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let keys = scrambled_keys(N);
    let mut group = c.benchmark_group("delete_all");

    for order in [3usize, 16] {
        let tree = BTree::build(order, keys.iter().map(|&k| (k, k))).unwrap();
        group.bench_function(BenchmarkId::from_parameter(order), |b| {
            b.iter_batched(
                || BTree::build(order, tree.iter().map(|(&k, &v)| (k, v))).unwrap(),
                |mut tree| {
                    for k in 0..N {
                        tree.delete(&k);
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_search, bench_delete);
criterion_main!(benches);
