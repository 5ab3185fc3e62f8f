// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph traversal: breadth-first and depth-first with an edge visitor.

use alloc::collections::VecDeque;
use alloc::vec;

use crate::graph::{DirectedGraph, NodeId};

impl DirectedGraph {
    /// Breadth-first traversal from `from`.
    ///
    /// `visit(u, v)` fires once per discovered edge, in discovery order;
    /// already-visited targets are skipped.
    pub fn breadth_first_search(&self, from: NodeId, mut visit: impl FnMut(NodeId, NodeId)) {
        assert!(self.has_node(from), "traversal source does not exist");
        let mut visited = vec![false; self.node_count()];
        visited[from] = true;
        let mut queue = VecDeque::new();
        queue.push_back(from);

        while let Some(u) = queue.pop_front() {
            for v in self.neighbors_from(u) {
                if visited[v] {
                    continue;
                }
                visit(u, v);
                visited[v] = true;
                queue.push_back(v);
            }
        }
    }

    /// Depth-first traversal from `from`.
    ///
    /// `visit(u, v)` fires once per discovered edge; already-visited
    /// targets are skipped.
    pub fn depth_first_search(&self, from: NodeId, mut visit: impl FnMut(NodeId, NodeId)) {
        assert!(self.has_node(from), "traversal source does not exist");
        let mut visited = vec![false; self.node_count()];
        visited[from] = true;
        let mut stack = vec![from];

        while let Some(u) = stack.pop() {
            for v in self.neighbors_from(u) {
                if visited[v] {
                    continue;
                }
                visit(u, v);
                visited[v] = true;
                stack.push(v);
            }
        }
    }
}
