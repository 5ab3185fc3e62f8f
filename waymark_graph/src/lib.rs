// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waymark_graph --heading-base-level=0

//! Waymark Graph: shortest paths over a directed weighted graph.
//!
//! Waymark Graph stores a directed graph whose nodes carry embedded 2D
//! coordinates, and answers shortest-path and traversal queries over it.
//!
//! - [`DirectedGraph::dijkstra`] and
//!   [`DirectedGraph::bidirectional_dijkstra`] for plain shortest paths.
//! - [`DirectedGraph::astar`] and [`DirectedGraph::bidirectional_astar`],
//!   guided by the straight-line Euclidean distance between node
//!   positions — admissible whenever edge weights dominate those
//!   distances, as they do for road networks.
//! - [`DirectedGraph::breadth_first_search`] /
//!   [`DirectedGraph::depth_first_search`] with a per-edge visitor.
//!
//! Edge weights are non-negative; self-loops are rejected at construction.
//! An unreachable target is reported as `(empty path, f64::INFINITY)`
//! rather than an error.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Point;
//! use waymark_graph::DirectedGraph;
//!
//! // Triangle: the two-hop route wins.
//! let mut g = DirectedGraph::new();
//! let a = g.add_node(Point::new(0.0, 0.0));
//! let b = g.add_node(Point::new(1.0, 0.0));
//! let c = g.add_node(Point::new(2.0, 0.0));
//! g.add_edge(a, b, 1.0);
//! g.add_edge(b, c, 1.0);
//! g.add_edge(a, c, 3.0);
//!
//! let (path, length) = g.dijkstra(a, c);
//! assert_eq!(path, [a, b, c]);
//! assert_eq!(length, 2.0);
//!
//! // The heuristic-guided search agrees.
//! let (_, astar_length) = g.astar(a, c);
//! assert_eq!(astar_length, 2.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod graph;
mod shortest_path;
mod traverse;

pub use graph::{DirectedGraph, Edge, EdgeId, Node, NodeId};
