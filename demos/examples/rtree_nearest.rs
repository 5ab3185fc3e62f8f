// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-neighbour queries.
//!
//! Fill an index with a point grid and walk outward from a query point.
//!
//! Run:
//! - `cargo run -p waymark_examples --example rtree_nearest`

use kurbo::Point;
use waymark_rtree::{GeoPoint, RTree, SpatialObject};

fn main() {
    let mut tree = RTree::new(4, 8);
    for y in 0..20 {
        for x in 0..20 {
            tree.insert(GeoPoint::new(Point::new(f64::from(x) * 5.0, f64::from(y) * 5.0)));
        }
    }

    let query = GeoPoint::new(Point::new(31.0, 47.0));
    let nearest = tree.nearest_neighbors(5, &query);
    println!("five nearest to {:?}:", query.point());
    let mut last = 0.0;
    for p in nearest {
        let d = query.distance_squared(&p.bounding_rect());
        println!("  {:?} (squared distance {d:.3})", p.point());
        assert!(d >= last, "results must come back in distance order");
        last = d;
    }
}
