// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waymark_rtree --heading-base-level=0

//! Waymark R-tree: a dynamic 2D spatial index.
//!
//! Waymark R-tree stores geometric objects under a balanced hierarchy of
//! axis-aligned bounding rectangles — the classic Guttman R-tree with the
//! quadratic-cost split — and answers intersection and nearest-neighbour
//! queries over them.
//!
//! - Insert and delete objects dynamically; the tree rebalances itself.
//! - Query by rectangle intersection or by k-nearest-neighbour distance.
//! - Index anything that can report a bounding rectangle: implement
//!   [`SpatialObject`], or use the bundled [`GeoPoint`] adapter for 2D
//!   points.
//!
//! ## API overview
//!
//! - [`RTree`]: the index. [`RTree::new`] takes the branching bounds
//!   `(min_branch, max_branch)` that govern balance vs fan-out.
//! - [`Aabb`]: axis-aligned rectangle with a cached area.
//! - [`SpatialObject`]: the capability an indexable value must expose.
//! - [`GeoPoint`]: a `kurbo::Point` promoted to a small rectangle; the
//!   inflation half-width defaults to [`DEFAULT_POINT_EPSILON`] and can be
//!   set per point at construction.
//!
//! Key operations:
//! - [`RTree::insert`](tree::RTree::insert) and
//!   [`RTree::delete`](tree::RTree::delete) (by object identity).
//! - [`RTree::search_intersect`](tree::RTree::search_intersect).
//! - [`RTree::nearest_neighbors`](tree::RTree::nearest_neighbors).
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Point;
//! use waymark_rtree::{Aabb, GeoPoint, RTree};
//!
//! let mut tree = RTree::new(2, 4);
//! for (x, y) in [(0.0, 0.0), (10.0, 10.0), (5.0, 5.0), (7.0, 3.0)] {
//!     tree.insert(GeoPoint::new(Point::new(x, y)));
//! }
//!
//! // Everything in the lower-left quadrant.
//! let hits = tree.search_intersect(&Aabb::new(0.0, 0.0, 6.0, 6.0));
//! assert_eq!(hits.len(), 2);
//!
//! // The two points nearest to (6, 4.5).
//! let near = tree.nearest_neighbors(2, &GeoPoint::new(Point::new(6.0, 4.5)));
//! assert_eq!(near[0].point(), Point::new(5.0, 5.0));
//! assert_eq!(near[1].point(), Point::new(7.0, 3.0));
//!
//! // Deletion matches identity and reports presence.
//! assert!(tree.delete(&GeoPoint::new(Point::new(5.0, 5.0))));
//! assert_eq!(tree.size(), 3);
//! ```
//!
//! ## Semantics worth knowing
//!
//! - Intersection is non-strict: rectangles that merely touch count.
//! - Two distinct objects may share a bounding box; deletion matches object
//!   identity (`PartialEq`), never geometry.
//! - Distances are squared Euclidean point-to-rectangle distances; results
//!   of [`RTree::nearest_neighbors`](tree::RTree::nearest_neighbors) come
//!   back in non-decreasing distance order.
//! - Coordinates are assumed finite. No NaNs.
//! - The tree is not internally synchronised; serialise writers externally.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod query;
pub mod tree;
pub mod types;

pub use tree::RTree;
pub use types::{Aabb, DEFAULT_POINT_EPSILON, GeoPoint, SpatialObject};
