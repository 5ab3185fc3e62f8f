// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use waymark_rtree::{Aabb, GeoPoint, RTree};

use rstar::{AABB, RTree as RStarTree};

fn gen_grid_points(n: usize, cell: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push((x as f64 * cell, y as f64 * cell));
        }
    }
    out
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[32usize, 64] {
        let points = gen_grid_points(n, 10.0);
        let query = Aabb::new(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("waymark_build_query_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut tree = RTree::new(4, 8);
                    for (x, y) in points {
                        tree.insert(GeoPoint::new(Point::new(x, y)));
                    }
                    let hits = tree.search_intersect(&query).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.iter().map(|&(x, y)| [x, y]).collect::<Vec<_>>(),
                |coords| {
                    let tree = RStarTree::bulk_load(coords);
                    let envelope = AABB::from_corners(
                        [query.min_x(), query.min_y()],
                        [query.max_x(), query.max_y()],
                    );
                    let hits = tree.locate_in_envelope_intersecting(&envelope).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
