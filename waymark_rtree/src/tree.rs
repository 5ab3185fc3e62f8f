// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena storage, insertion, and deletion.

use alloc::vec::Vec;
use core::mem;

use crate::types::{Aabb, SpatialObject};

/// A spatial index record held by a node: either a stored object or a child
/// node, always together with its bounding rectangle.
pub(crate) enum Entry<T> {
    /// An object stored in a leaf, under its bounding rectangle.
    Leaf { bb: Aabb, object: T },
    /// A child node; `bb` covers every entry of that child.
    Internal { bb: Aabb, child: usize },
}

impl<T> Entry<T> {
    pub(crate) fn bb(&self) -> &Aabb {
        match self {
            Self::Leaf { bb, .. } | Self::Internal { bb, .. } => bb,
        }
    }

    fn set_bb(&mut self, new: Aabb) {
        match self {
            Self::Leaf { bb, .. } | Self::Internal { bb, .. } => *bb = new,
        }
    }

    fn child(&self) -> Option<usize> {
        match self {
            Self::Internal { child, .. } => Some(*child),
            Self::Leaf { .. } => None,
        }
    }
}

/// A tree node. Leaves sit at level 1; levels strictly increase toward the
/// root, whose level equals the tree height. The parent link is a weak
/// back-reference used only for upward walks.
pub(crate) struct Node<T> {
    pub(crate) level: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) entries: Vec<Entry<T>>,
}

impl<T> Node<T> {
    fn new_leaf() -> Self {
        Self {
            level: 1,
            parent: None,
            entries: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.level == 1
    }
}

/// A dynamic 2D R-tree in the original Guttman formulation: quadratic-cost
/// pick-seeds split, least-enlargement descent, condense-and-reinsert
/// deletion.
///
/// Every non-root node holds between `min_branch` and `max_branch` entries;
/// the root alone may hold fewer. Nodes live in arena slots owned by the
/// tree; no handle to an internal node ever escapes.
///
/// The tree is not internally synchronised. Concurrent readers must observe
/// a quiescent tree; callers serialise writers externally.
pub struct RTree<T> {
    min_branch: usize,
    max_branch: usize,
    root: usize,
    size: usize,
    height: usize,
    nodes: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
}

impl<T> RTree<T> {
    /// Create an empty tree with the given branching bounds.
    ///
    /// # Panics
    ///
    /// Panics unless `max_branch >= 3` and
    /// `2 <= min_branch <= ceil(max_branch / 2)`; out-of-range parameters
    /// are a construction bug, not a recoverable condition.
    pub fn new(min_branch: usize, max_branch: usize) -> Self {
        assert!(max_branch >= 3, "max_branch must be at least 3");
        assert!(
            min_branch >= 2 && min_branch <= max_branch.div_ceil(2),
            "min_branch must lie in 2..=ceil(max_branch / 2)"
        );
        let mut tree = Self {
            min_branch,
            max_branch,
            root: 0,
            size: 0,
            height: 1,
            nodes: Vec::new(),
            free_list: Vec::new(),
        };
        tree.root = tree.alloc(Node::new_leaf());
        tree
    }

    /// Number of stored objects.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Height of the tree; 1 when the root is a leaf.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn root(&self) -> usize {
        self.root
    }

    pub(crate) fn node(&self, idx: usize) -> &Node<T> {
        self.nodes[idx].as_ref().expect("dangling node slot")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        self.nodes[idx].as_mut().expect("dangling node slot")
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn free(&mut self, idx: usize) {
        self.nodes[idx] = None;
        self.free_list.push(idx);
    }

    /// Union of the bounding rectangles of `idx`'s entries.
    fn bounding_box(&self, idx: usize) -> Aabb {
        let node = self.node(idx);
        let mut it = node.entries.iter();
        let mut bb = *it.next().expect("bounding box of an empty node").bb();
        for entry in it {
            bb.enlarge(entry.bb());
        }
        bb
    }

    /// Position of the entry in `parent` that points at `child`.
    fn position_in_parent(&self, parent: usize, child: usize) -> usize {
        self.node(parent)
            .entries
            .iter()
            .position(|e| e.child() == Some(child))
            .expect("node missing from its parent's entries")
    }
}

impl<T: SpatialObject> RTree<T> {
    /// Insert an object, rebalancing on overflow.
    pub fn insert(&mut self, object: T) {
        let bb = object.bounding_rect();
        self.insert_at(Entry::Leaf { bb, object }, 1);
        self.size += 1;
    }

    /// Insert an entry into a node at `target_level`. Level 1 stores
    /// objects; deletion reinserts orphaned subtrees at higher levels.
    fn insert_at(&mut self, entry: Entry<T>, target_level: usize) {
        let target = self.choose_node(entry.bb(), target_level);
        if let Some(child) = entry.child() {
            self.node_mut(child).parent = Some(target);
        }
        self.node_mut(target).entries.push(entry);
        let overflowed = self.node(target).entries.len() > self.max_branch;
        let split = overflowed.then(|| self.split(target));
        self.adjust(target, split);
    }

    /// Walk from the root to the node at `target_level` whose entry needs
    /// the least enlargement to admit `bb`; ties prefer the smaller entry,
    /// then the first encountered.
    fn choose_node(&self, bb: &Aabb, target_level: usize) -> usize {
        let mut idx = self.root;
        loop {
            let node = self.node(idx);
            if node.is_leaf() || node.level == target_level {
                return idx;
            }
            let mut chosen: Option<(f64, f64, usize)> = None;
            for entry in &node.entries {
                let enlargement = entry.bb().union(bb).area() - entry.bb().area();
                let area = entry.bb().area();
                let better = match chosen {
                    None => true,
                    Some((best_enlargement, best_area, _)) => {
                        enlargement < best_enlargement
                            || (enlargement == best_enlargement && area < best_area)
                    }
                };
                if better {
                    let child = entry.child().expect("internal node with a leaf entry");
                    chosen = Some((enlargement, area, child));
                }
            }
            idx = chosen.expect("descent through an empty internal node").2;
        }
    }

    /// Quadratic split of an overflowed node. The node keeps its slot and
    /// parent link and becomes the left group; the returned slot is the new
    /// right sibling at the same level.
    fn split(&mut self, idx: usize) -> usize {
        let mut remaining = mem::take(&mut self.node_mut(idx).entries);
        let (seed_left, seed_right) = pick_seeds(&remaining);
        // Remove the higher index first so the lower stays valid.
        let right_seed = remaining.remove(seed_right);
        let left_seed = remaining.remove(seed_left);

        let (level, parent) = {
            let node = self.node(idx);
            (node.level, node.parent)
        };
        let right = self.alloc(Node {
            level,
            parent,
            entries: Vec::new(),
        });

        if let Some(child) = left_seed.child() {
            self.node_mut(child).parent = Some(idx);
        }
        if let Some(child) = right_seed.child() {
            self.node_mut(child).parent = Some(right);
        }
        self.node_mut(idx).entries.push(left_seed);
        self.node_mut(right).entries.push(right_seed);

        self.assign_group(remaining, idx, right);
        right
    }

    /// Distribute the non-seed entries between the two split groups by
    /// greatest preference, with forced assignment so neither group can
    /// miss the `min_branch` floor.
    fn assign_group(&mut self, mut remaining: Vec<Entry<T>>, left: usize, right: usize) {
        while !remaining.is_empty() {
            let left_bb = self.bounding_box(left);
            let right_bb = self.bounding_box(right);

            let mut next = 0;
            let mut max_preference = f64::NEG_INFINITY;
            let mut next_left_diff = 0.0;
            let mut next_right_diff = 0.0;
            for (i, entry) in remaining.iter().enumerate() {
                let left_diff = left_bb.union(entry.bb()).area() - left_bb.area();
                let right_diff = right_bb.union(entry.bb()).area() - right_bb.area();
                let preference = if left_diff > right_diff {
                    left_diff - right_diff
                } else {
                    right_diff - left_diff
                };
                if preference > max_preference {
                    max_preference = preference;
                    next_left_diff = left_diff;
                    next_right_diff = right_diff;
                    next = i;
                }
            }

            let left_len = self.node(left).entries.len();
            let right_len = self.node(right).entries.len();
            let target = if left_len + remaining.len() <= self.min_branch {
                left
            } else if right_len + remaining.len() <= self.min_branch {
                right
            } else if next_left_diff < next_right_diff {
                left
            } else if next_right_diff < next_left_diff {
                right
            } else if left_bb.area() < right_bb.area() {
                left
            } else if right_bb.area() < left_bb.area() {
                right
            } else if left_len < right_len {
                left
            } else {
                right
            };

            let entry = remaining.remove(next);
            if let Some(child) = entry.child() {
                self.node_mut(child).parent = Some(target);
            }
            self.node_mut(target).entries.push(entry);
        }
    }

    /// Propagate bounding-box changes (and a possible split sibling) from
    /// `idx` upward, growing a new root when the root itself split.
    fn adjust(&mut self, idx: usize, split: Option<usize>) {
        if idx == self.root {
            if let Some(sibling) = split {
                let left_bb = self.bounding_box(idx);
                let right_bb = self.bounding_box(sibling);
                self.height += 1;
                let new_root = self.alloc(Node {
                    level: self.height,
                    parent: None,
                    entries: Vec::new(),
                });
                self.node_mut(new_root).entries.push(Entry::Internal {
                    bb: left_bb,
                    child: idx,
                });
                self.node_mut(new_root).entries.push(Entry::Internal {
                    bb: right_bb,
                    child: sibling,
                });
                self.node_mut(idx).parent = Some(new_root);
                self.node_mut(sibling).parent = Some(new_root);
                self.root = new_root;
            }
            return;
        }

        let parent = self.node(idx).parent.expect("non-root node without a parent");
        let pos = self.position_in_parent(parent, idx);
        let bb = self.bounding_box(idx);
        self.node_mut(parent).entries[pos].set_bb(bb);

        match split {
            None => self.adjust(parent, None),
            Some(sibling) => {
                let bb = self.bounding_box(sibling);
                self.node_mut(parent).entries.push(Entry::Internal {
                    bb,
                    child: sibling,
                });
                if self.node(parent).entries.len() > self.max_branch {
                    let parent_sibling = self.split(parent);
                    self.adjust(parent, Some(parent_sibling));
                } else {
                    self.adjust(parent, None);
                }
            }
        }
    }

    /// Remove an object, matching by identity. Returns whether it was
    /// present.
    pub fn delete(&mut self, object: &T) -> bool
    where
        T: PartialEq,
    {
        let rect = object.bounding_rect();
        let Some(leaf) = self.find_leaf(self.root, &rect, object) else {
            return false;
        };
        let pos = self
            .node(leaf)
            .entries
            .iter()
            .position(|e| matches!(e, Entry::Leaf { object: stored, .. } if stored == object))
            .expect("found leaf without the object");
        self.node_mut(leaf).entries.remove(pos);
        self.condense(leaf);
        self.size -= 1;

        // An internal root left with a single child shrinks the tree.
        if !self.node(self.root).is_leaf() && self.node(self.root).entries.len() == 1 {
            let old_root = self.root;
            let child = self.node(old_root).entries[0]
                .child()
                .expect("internal node with a leaf entry");
            self.free(old_root);
            self.root = child;
            self.node_mut(child).parent = None;
            self.height -= 1;
        }
        true
    }

    /// Find the leaf holding `object`, following every entry whose
    /// rectangle contains the object's; first identity match wins.
    fn find_leaf(&self, idx: usize, rect: &Aabb, object: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let node = self.node(idx);
        if node.is_leaf() {
            return node
                .entries
                .iter()
                .any(|e| matches!(e, Entry::Leaf { object: stored, .. } if stored == object))
                .then_some(idx);
        }
        for entry in &node.entries {
            if entry.bb().contains(rect) {
                let child = entry.child().expect("internal node with a leaf entry");
                if let Some(leaf) = self.find_leaf(child, rect, object) {
                    return Some(leaf);
                }
            }
        }
        None
    }

    /// Walk from the affected leaf to the root, dropping underfull nodes
    /// and refreshing ancestor rectangles, then reinsert the entries of the
    /// dropped nodes at their original level so subtrees keep their height.
    fn condense(&mut self, from: usize) {
        let mut orphans: Vec<usize> = Vec::new();
        let mut idx = from;
        while idx != self.root {
            let parent = self.node(idx).parent.expect("non-root node without a parent");
            if self.node(idx).entries.len() < self.min_branch {
                let pos = self.position_in_parent(parent, idx);
                self.node_mut(parent).entries.remove(pos);
                if self.node(idx).entries.is_empty() {
                    self.free(idx);
                } else {
                    orphans.push(idx);
                }
            } else {
                let pos = self.position_in_parent(parent, idx);
                let bb = self.bounding_box(idx);
                self.node_mut(parent).entries[pos].set_bb(bb);
            }
            idx = parent;
        }

        for orphan in orphans {
            let level = self.node(orphan).level;
            let entries = mem::take(&mut self.node_mut(orphan).entries);
            self.free(orphan);
            for entry in entries {
                self.insert_at(entry, level);
            }
        }
    }
}

impl<T> core::fmt::Debug for RTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("RTree")
            .field("min_branch", &self.min_branch)
            .field("max_branch", &self.max_branch)
            .field("size", &self.size)
            .field("height", &self.height)
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .finish_non_exhaustive()
    }
}

/// Choose the pair of entries wasting the most area when grouped together,
/// scanning pairs in canonical `(i, j)` order with `i < j`; the first pair
/// wins ties.
fn pick_seeds<T>(entries: &[Entry<T>]) -> (usize, usize) {
    let mut best = (0, 1);
    let mut max_waste = f64::NEG_INFINITY;
    for (i, a) in entries.iter().enumerate() {
        for (j, b) in entries.iter().enumerate().skip(i + 1) {
            let waste = a.bb().union(b.bb()).area() - a.bb().area() - b.bb().area();
            if waste > max_waste {
                max_waste = waste;
                best = (i, j);
            }
        }
    }
    best
}

#[cfg(test)]
impl<T> RTree<T> {
    /// Walk the whole tree checking the structural invariants.
    pub(crate) fn check_invariants(&self) {
        let root = self.root;
        assert!(self.node(root).parent.is_none(), "root must have no parent");
        assert_eq!(
            self.node(root).level,
            self.height,
            "root level must equal the tree height"
        );
        let mut leaf_entries = 0;
        self.check_node(root, None, &mut leaf_entries);
        assert_eq!(leaf_entries, self.size, "size must count the leaf entries");
    }

    fn check_node(&self, idx: usize, expected_parent: Option<usize>, leaf_entries: &mut usize) {
        let node = self.node(idx);
        assert_eq!(node.parent, expected_parent, "parent link out of sync");
        if idx != self.root {
            assert!(
                node.entries.len() >= self.min_branch && node.entries.len() <= self.max_branch,
                "non-root node with {} entries outside {}..={}",
                node.entries.len(),
                self.min_branch,
                self.max_branch,
            );
        } else {
            assert!(node.entries.len() <= self.max_branch, "root overflow");
        }
        for entry in &node.entries {
            match entry {
                Entry::Leaf { .. } => {
                    assert!(node.is_leaf(), "object entry in an internal node");
                    *leaf_entries += 1;
                }
                Entry::Internal { bb, child } => {
                    assert!(!node.is_leaf(), "child entry in a leaf");
                    assert_eq!(
                        self.node(*child).level + 1,
                        node.level,
                        "levels must increase by one toward the root"
                    );
                    assert_eq!(
                        *bb,
                        self.bounding_box(*child),
                        "entry rectangle must cover the child exactly"
                    );
                    self.check_node(*child, Some(idx), leaf_entries);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use kurbo::Point;

    use super::*;
    use crate::types::GeoPoint;

    fn pt(x: f64, y: f64) -> GeoPoint {
        GeoPoint::new(Point::new(x, y))
    }

    /// Deterministic xorshift, enough to shuffle test workloads.
    struct Rng(u64);

    impl Rng {
        fn new(seed: u64) -> Self {
            Self(seed)
        }

        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn next_f64(&mut self) -> f64 {
            let v = self.next_u64() >> 11;
            (v as f64) / ((1u64 << 53) as f64)
        }
    }

    #[test]
    #[should_panic(expected = "min_branch")]
    fn rejects_min_branch_above_half_of_max() {
        let _ = RTree::<GeoPoint>::new(3, 4);
    }

    #[test]
    #[should_panic(expected = "max_branch")]
    fn rejects_tiny_max_branch() {
        let _ = RTree::<GeoPoint>::new(2, 2);
    }

    #[test]
    fn empty_tree() {
        let tree = RTree::<GeoPoint>::new(2, 4);
        assert_eq!(tree.size(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        tree.check_invariants();
    }

    #[test]
    fn fills_a_single_leaf_before_splitting() {
        let mut tree = RTree::new(2, 4);
        for p in [pt(0.0, 0.0), pt(10.0, 10.0), pt(5.0, 5.0), pt(7.0, 3.0)] {
            tree.insert(p);
            tree.check_invariants();
        }
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn overflow_splits_and_grows_the_root() {
        let mut tree = RTree::new(2, 4);
        let points = [
            pt(0.0, 0.0),
            pt(10.0, 10.0),
            pt(5.0, 5.0),
            pt(7.0, 3.0),
            pt(2.0, 8.0),
        ];
        for p in points {
            tree.insert(p);
        }
        // The fifth insert overflows a max_branch of 4.
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.height(), 2);
        tree.check_invariants();

        tree.insert(pt(1.0, 1.0));
        tree.insert(pt(9.0, 9.0));
        assert_eq!(tree.size(), 7);
        assert_eq!(tree.height(), 2);
        tree.check_invariants();
    }

    #[test]
    fn delete_returns_presence() {
        let mut tree = RTree::new(2, 4);
        for p in [
            pt(0.0, 0.0),
            pt(10.0, 10.0),
            pt(5.0, 5.0),
            pt(7.0, 3.0),
            pt(2.0, 8.0),
            pt(1.0, 1.0),
            pt(9.0, 9.0),
        ] {
            tree.insert(p);
        }
        assert!(tree.delete(&pt(5.0, 5.0)));
        assert_eq!(tree.size(), 6);
        tree.check_invariants();
        assert!(!tree.delete(&pt(5.0, 5.0)));
        assert_eq!(tree.size(), 6);
        tree.check_invariants();
    }

    #[test]
    fn insert_then_delete_is_a_no_op() {
        let mut tree = RTree::new(2, 3);
        for p in [pt(0.0, 0.0), pt(4.0, 4.0), pt(8.0, 0.0)] {
            tree.insert(p);
        }
        let height_before = tree.height();
        let size_before = tree.size();

        tree.insert(pt(2.0, 2.0));
        assert!(tree.delete(&pt(2.0, 2.0)));

        assert_eq!(tree.size(), size_before);
        assert_eq!(tree.height(), height_before);
        tree.check_invariants();
    }

    #[test]
    fn duplicate_bounding_boxes_are_distinct_objects() {
        let mut tree = RTree::new(2, 3);
        let a = GeoPoint::new(Point::new(1.0, 1.0));
        // Same geometry, distinct identity through the inflation width.
        let b = GeoPoint::with_epsilon(Point::new(1.0, 1.0), 3e-5);
        tree.insert(a);
        tree.insert(b);
        tree.insert(a);
        assert_eq!(tree.size(), 3);

        // Deleting one identity leaves the other untouched.
        assert!(tree.delete(&b));
        assert_eq!(tree.size(), 2);
        assert!(!tree.delete(&b));
        assert!(tree.delete(&a));
        assert!(tree.delete(&a));
        assert!(tree.is_empty());
        tree.check_invariants();
    }

    #[test]
    fn delete_to_empty_restores_the_initial_shape() {
        let mut tree = RTree::new(2, 3);
        let mut points = Vec::new();
        for i in 0..20 {
            let p = pt(f64::from(i), f64::from(i % 7));
            points.push(p);
            tree.insert(p);
        }
        tree.check_invariants();
        for p in &points {
            assert!(tree.delete(p));
            tree.check_invariants();
        }
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn narrowest_branching_stays_balanced() {
        let mut tree = RTree::new(2, 3);
        let mut rng = Rng::new(0x5eed);
        let mut points = Vec::new();
        for _ in 0..200 {
            let p = pt(rng.next_f64() * 100.0, rng.next_f64() * 100.0);
            points.push(p);
            tree.insert(p);
        }
        tree.check_invariants();
        for (i, p) in points.iter().enumerate() {
            if i % 3 == 0 {
                assert!(tree.delete(p));
            }
        }
        tree.check_invariants();
    }

    #[test]
    fn random_workload_keeps_every_invariant() {
        let mut tree = RTree::new(2, 4);
        let mut rng = Rng::new(0xDECAF);
        let mut points = Vec::with_capacity(1000);
        for _ in 0..1000 {
            let p = pt(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0);
            points.push(p);
            tree.insert(p);
        }
        assert_eq!(tree.size(), 1000);
        tree.check_invariants();

        // Delete half, in a shuffled order.
        let mut deleted = 0;
        let mut i = 0;
        while deleted < 500 {
            let victim = (rng.next_u64() as usize) % points.len();
            let p = points.remove(victim);
            assert!(tree.delete(&p), "stored point must be deletable");
            deleted += 1;
            i += 1;
            if i % 50 == 0 {
                tree.check_invariants();
            }
        }
        tree.check_invariants();
        assert_eq!(tree.size(), 500);

        // Everything that remains is still findable.
        let everything = Aabb::new(-1e9, -1e9, 1e9, 1e9);
        let found = tree.search_intersect(&everything);
        assert_eq!(found.len(), 500);
        for p in &points {
            assert!(found.iter().any(|f| *f == p));
        }
    }
}
