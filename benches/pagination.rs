use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use item_catalog::{paginate, Item, ItemSnapshot};

fn catalog(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| Item::new(format!("item_{i}"), format!("Item {i}")).with_category("bench"))
        .collect()
}

fn bench_paginate(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate");

    for size in [100usize, 10_000, 100_000] {
        let snapshot = ItemSnapshot::from_items(catalog(size));

        group.bench_with_input(BenchmarkId::new("first_page", size), &snapshot, |b, snapshot| {
            b.iter(|| paginate(black_box(snapshot.ordered_items()), 0, 20));
        });

        group.bench_with_input(BenchmarkId::new("middle_page_cloned", size), &snapshot, |b, snapshot| {
            b.iter(|| {
                paginate(black_box(snapshot.ordered_items()), size / 2, 100).map(|item| Item::clone(item))
            });
        });
    }

    group.finish();
}

fn bench_snapshot_build(c: &mut Criterion) {
    let items = catalog(10_000);
    c.bench_function("snapshot_from_items_10k", |b| {
        b.iter(|| ItemSnapshot::from_items(black_box(items.clone())));
    });
}

criterion_group!(benches, bench_paginate, bench_snapshot_build);
criterion_main!(benches);
