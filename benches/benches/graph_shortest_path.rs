// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use waymark_graph::DirectedGraph;

/// A square road grid with unit spacing and both-way axis edges.
fn gen_grid_graph(n: usize) -> DirectedGraph {
    let mut g = DirectedGraph::new();
    let mut ids = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            ids.push(g.add_node(Point::new(x as f64, y as f64)));
        }
    }
    for y in 0..n {
        for x in 0..n {
            let here = ids[y * n + x];
            if x + 1 < n {
                g.add_edge(here, ids[y * n + x + 1], 1.0);
                g.add_edge(ids[y * n + x + 1], here, 1.0);
            }
            if y + 1 < n {
                g.add_edge(here, ids[(y + 1) * n + x], 1.0);
                g.add_edge(ids[(y + 1) * n + x], here, 1.0);
            }
        }
    }
    g
}

fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_shortest_path");
    for &n in &[32usize, 64] {
        let g = gen_grid_graph(n);
        let from = 0;
        let to = n * n - 1;
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("dijkstra_n{}", n), |b| {
            b.iter(|| {
                let (path, length) = g.dijkstra(from, to);
                black_box((path.len(), length));
            })
        });

        group.bench_function(format!("bidirectional_dijkstra_n{}", n), |b| {
            b.iter(|| {
                let (path, length) = g.bidirectional_dijkstra(from, to);
                black_box((path.len(), length));
            })
        });

        group.bench_function(format!("astar_n{}", n), |b| {
            b.iter(|| {
                let (path, length) = g.astar(from, to);
                black_box((path.len(), length));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shortest_paths);
criterion_main!(benches);
