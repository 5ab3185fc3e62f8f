// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Build a small index, query a rectangle, and delete a point.
//!
//! Run:
//! - `cargo run -p waymark_examples --example rtree_basics`

use kurbo::Point;
use waymark_rtree::{Aabb, GeoPoint, RTree};

fn main() {
    let mut tree = RTree::new(2, 4);
    for (x, y) in [
        (0.0, 0.0),
        (10.0, 10.0),
        (5.0, 5.0),
        (7.0, 3.0),
        (2.0, 8.0),
        (1.0, 1.0),
        (9.0, 9.0),
    ] {
        tree.insert(GeoPoint::new(Point::new(x, y)));
    }
    println!("size: {}, height: {}", tree.size(), tree.height());

    // Everything in the lower-left quadrant.
    let query = Aabb::new(0.0, 0.0, 6.0, 6.0);
    let hits = tree.search_intersect(&query);
    println!("points in the lower-left quadrant: {}", hits.len());
    for p in &hits {
        println!("  {:?}", p.point());
    }

    // Deletion matches object identity and reports presence.
    let gone = tree.delete(&GeoPoint::new(Point::new(5.0, 5.0)));
    println!("deleted (5, 5): {gone}, size now {}", tree.size());
    assert!(gone, "the stored point should have been found");
}
