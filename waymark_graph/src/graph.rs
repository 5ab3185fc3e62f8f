// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directed weighted graph with embedded 2D coordinates.

use alloc::vec::Vec;
use kurbo::{Line, ParamCurve, ParamCurveNearest, Point};

/// Identifier of a node; dense, assigned in insertion order.
pub type NodeId = usize;

/// Identifier of a directed edge: its `(from, to)` node pair.
pub type EdgeId = (NodeId, NodeId);

/// A graph node with an embedded position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Point,
}

impl Node {
    /// This node's identifier.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// This node's embedded position.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Euclidean distance to another node.
    pub fn distance(&self, other: &Self) -> f64 {
        self.position.distance(other.position)
    }

    /// Squared Euclidean distance to another node.
    pub fn distance_squared(&self, other: &Self) -> f64 {
        self.position.distance_squared(other.position)
    }
}

/// A directed edge with a non-negative weight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    weight: f64,
}

impl Edge {
    /// The edge identifier, `(from, to)`.
    #[inline]
    pub fn id(&self) -> EdgeId {
        (self.from, self.to)
    }

    /// Source node.
    #[inline]
    pub fn source(&self) -> NodeId {
        self.from
    }

    /// Target node.
    #[inline]
    pub fn target(&self) -> NodeId {
        self.to
    }

    /// Edge weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A directed weighted graph with per-node outgoing and incoming edge
/// lists.
///
/// Edge lookup scans the source node's outgoing list, so graphs with a very
/// high out-degree pay for [`DirectedGraph::edge`] and
/// [`DirectedGraph::weight`].
pub struct DirectedGraph {
    nodes: Vec<Node>,
    outgoing: Vec<Vec<Edge>>,
    incoming: Vec<Vec<Edge>>,
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Add a node at `position` and return its identifier.
    pub fn add_node(&mut self, position: Point) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { id, position });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Add a directed edge from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics on a self-loop or an unknown endpoint; both indicate a
    /// construction bug.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        assert!(from != to, "self-loop edge {from} -> {to}");
        assert!(
            self.has_node(from) && self.has_node(to),
            "edge endpoint does not exist"
        );
        debug_assert!(weight >= 0.0, "negative edge weight");
        let edge = Edge { from, to, weight };
        self.outgoing[from].push(edge);
        self.incoming[to].push(edge);
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a stored node.
    #[inline]
    pub fn has_node(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    /// The node with identifier `id`, if any.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The edge with identifier `id`, if any.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        let (from, _) = id;
        self.outgoing.get(from)?.iter().find(|e| e.id() == id)
    }

    /// Whether `id` names a stored edge.
    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Weight of the directed edge `u -> v`; `None` when absent (including
    /// `u == v`, which can never be an edge).
    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        if u == v {
            return None;
        }
        self.edge((u, v)).map(Edge::weight)
    }

    /// Targets of `u`'s outgoing edges, in insertion order.
    pub fn neighbors_from(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing[u].iter().map(|e| e.to)
    }

    /// Euclidean distance between two stored nodes.
    pub fn distance(&self, u: NodeId, v: NodeId) -> f64 {
        self.nodes[u].distance(&self.nodes[v])
    }

    /// Squared distance from `p` to the closest point of the edge's
    /// segment, or `None` for an unknown edge.
    pub fn distance_squared_to_edge(&self, p: Point, id: EdgeId) -> Option<f64> {
        let edge = self.edge(id)?;
        let line = Line::new(
            self.nodes[edge.from].position,
            self.nodes[edge.to].position,
        );
        Some(line.nearest(p, 1e-9).distance_sq)
    }

    /// Distance from `p` to the closest point of the edge's segment, or
    /// `None` for an unknown edge.
    pub fn distance_to_edge(&self, p: Point, id: EdgeId) -> Option<f64> {
        let edge = self.edge(id)?;
        let line = Line::new(
            self.nodes[edge.from].position,
            self.nodes[edge.to].position,
        );
        let nearest = line.nearest(p, 1e-9);
        Some(p.distance(line.eval(nearest.t)))
    }

    pub(crate) fn outgoing(&self, id: NodeId) -> &[Edge] {
        &self.outgoing[id]
    }

    pub(crate) fn incoming(&self, id: NodeId) -> &[Edge] {
        &self.incoming[id]
    }
}

impl core::fmt::Debug for DirectedGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let edges: usize = self.outgoing.iter().map(Vec::len).sum();
        f.debug_struct("DirectedGraph")
            .field("nodes", &self.nodes.len())
            .field("edges", &edges)
            .finish_non_exhaustive()
    }
}
