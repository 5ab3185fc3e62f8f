// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use waymark_rtree::{Aabb, GeoPoint, RTree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_grid_points(n: usize, cell: f64) -> Vec<GeoPoint> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(GeoPoint::new(Point::new(x as f64 * cell, y as f64 * cell)));
        }
    }
    out
}

fn gen_random_points(count: usize, extent: f64, seed: u64) -> Vec<GeoPoint> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| GeoPoint::new(Point::new(rng.next_f64() * extent, rng.next_f64() * extent)))
        .collect()
}

fn bench_build_and_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_build_search");
    for &n in &[32usize, 64] {
        let points = gen_grid_points(n, 10.0);
        let query = Aabb::new(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("build_search_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut tree = RTree::new(4, 8);
                    for p in points {
                        tree.insert(p);
                    }
                    let hits = tree.search_intersect(&query).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_nearest");
    for &count in &[1_000usize, 10_000] {
        let points = gen_random_points(count, 1_000.0, 0x5eed);
        let mut tree = RTree::new(4, 8);
        for p in &points {
            tree.insert(*p);
        }
        let query = GeoPoint::new(Point::new(500.0, 500.0));
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function(format!("knn10_n{}", count), |b| {
            b.iter(|| {
                let near = tree.nearest_neighbors(10, &query);
                black_box(near.len());
            })
        });
    }
    group.finish();
}

fn bench_delete_half(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_delete");
    let points = gen_random_points(2_000, 1_000.0, 0xDECAF);
    group.throughput(Throughput::Elements(points.len() as u64 / 2));

    group.bench_function("delete_half_n2000", |b| {
        b.iter_batched(
            || {
                let mut tree = RTree::new(4, 8);
                for p in &points {
                    tree.insert(*p);
                }
                tree
            },
            |mut tree| {
                for p in points.iter().step_by(2) {
                    black_box(tree.delete(p));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build_and_search,
    bench_nearest,
    bench_delete_half
);
criterion_main!(benches);
