// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection and nearest-neighbour queries.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::{Ordering, Reverse};

use crate::tree::{Entry, RTree};
use crate::types::{Aabb, SpatialObject};

impl<T> RTree<T> {
    /// Collect every stored object whose bounding rectangle intersects
    /// `rect`, in tree traversal order.
    ///
    /// The order is deterministic for a given tree shape, but callers must
    /// not rely on anything beyond that.
    pub fn search_intersect(&self, rect: &Aabb) -> Vec<&T> {
        let mut results = Vec::new();
        self.search_node(self.root(), rect, &mut results);
        results
    }

    fn search_node<'a>(&'a self, idx: usize, rect: &Aabb, results: &mut Vec<&'a T>) {
        for entry in &self.node(idx).entries {
            if !entry.bb().intersects(rect) {
                continue;
            }
            match entry {
                Entry::Leaf { object, .. } => results.push(object),
                Entry::Internal { child, .. } => self.search_node(*child, rect, results),
            }
        }
    }

    /// The up-to-`k` stored objects closest to `query`, in non-decreasing
    /// squared distance from `query` to each object's bounding rectangle.
    ///
    /// Best-first branch and bound: an entry's distance never exceeds the
    /// distance to any object below it, because every descendant rectangle
    /// is contained in the entry's. Popping in distance order therefore
    /// yields objects in distance order.
    pub fn nearest_neighbors<Q>(&self, k: usize, query: &Q) -> Vec<&T>
    where
        Q: SpatialObject + ?Sized,
    {
        let mut results = Vec::new();
        if k == 0 {
            return results;
        }

        let mut heap = BinaryHeap::new();
        for entry in &self.node(self.root()).entries {
            heap.push(Reverse(Candidate {
                dist: query.distance_squared(entry.bb()),
                entry,
            }));
        }

        while let Some(Reverse(candidate)) = heap.pop() {
            match candidate.entry {
                Entry::Leaf { object, .. } => {
                    results.push(object);
                    if results.len() == k {
                        break;
                    }
                }
                Entry::Internal { child, .. } => {
                    for entry in &self.node(*child).entries {
                        heap.push(Reverse(Candidate {
                            dist: query.distance_squared(entry.bb()),
                            entry,
                        }));
                    }
                }
            }
        }
        results
    }
}

/// Heap item: an entry keyed by the squared distance from the query to its
/// rectangle — an exact object distance for leaf entries, a lower bound for
/// internal ones.
struct Candidate<'a, T> {
    dist: f64,
    entry: &'a Entry<T>,
}

impl<T> PartialEq for Candidate<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl<T> Eq for Candidate<'_, T> {}

impl<T> PartialOrd for Candidate<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Candidate<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Distances are finite by contract; only a NaN could fail here.
        self.dist.partial_cmp(&other.dist).expect("NaN distance")
    }
}
