// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route search.
//!
//! Build a small road grid and compare the shortest-path searches.
//!
//! Run:
//! - `cargo run -p waymark_examples --example route_search`

use kurbo::Point;
use waymark_graph::DirectedGraph;

fn main() {
    // A 10x10 road grid with unit-length, both-way streets.
    let n = 10;
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

    let from = ids[0];
    let to = ids[n * n - 1];

    let (path, length) = g.dijkstra(from, to);
    println!("dijkstra: {} hops, length {length}", path.len() - 1);

    let (path, length) = g.astar(from, to);
    println!("astar: {} hops, length {length}", path.len() - 1);

    let (path, length) = g.bidirectional_dijkstra(from, to);
    println!("bidirectional: {} hops, length {length}", path.len() - 1);

    assert_eq!(length, 18.0, "a corner-to-corner route crosses 18 streets");
}
