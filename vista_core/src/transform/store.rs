// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and lazily cached
//! matrices.

use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::{Affine, Point, Vec2};

use super::dirty::Dirty;
use super::id::{NO_SLOT, NodeId};
use super::pose::Pose;
use super::traverse::{NodeIter, slot};
use crate::error::{Error, Result};

/// Counters describing how much cache work the store has performed.
///
/// Reading a clean node never bumps a counter, which makes these useful for
/// checking that caching actually happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of local matrix recompositions.
    pub local_recomputes: u64,
    /// Number of absolute matrix (and inverse) recomputations.
    pub absolute_recomputes: u64,
    /// Number of nodes newly marked absolute-dirty.
    pub invalidations: u64,
}

/// Struct-of-arrays storage for transform nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Derived values (matrices and absolute components) sit behind [`Cell`]s so
/// the lazy getters can take `&self`. The store is therefore `!Sync`: it is
/// meant to be owned by the thread that drives the frame loop.
#[derive(Debug, Default)]
pub struct TransformStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) last_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) pose: Vec<Pose>,

    // -- Cached properties (written by the lazy getters) --
    local: Vec<Cell<Affine>>,
    absolute: Vec<Cell<Affine>>,
    inverse_absolute: Vec<Cell<Affine>>,
    absolute_rotation: Vec<Cell<f64>>,
    absolute_scale: Vec<Cell<Vec2>>,
    dirty: Vec<Cell<Dirty>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Scratch and diagnostics --
    stack: Vec<u32>,
    stats: Cell<CacheStats>,
}

impl TransformStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Allocation API --

    /// Creates a new root node with the identity pose and returns its handle.
    pub fn create_node(&mut self) -> NodeId {
        self.create_node_with(Pose::IDENTITY)
    }

    /// Creates a new root node with the given local pose.
    pub fn create_node_with(&mut self, pose: Pose) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot. The generation was bumped on destroy.
            let i = idx as usize;
            self.parent[i] = NO_SLOT;
            self.first_child[i] = NO_SLOT;
            self.last_child[i] = NO_SLOT;
            self.next_sibling[i] = NO_SLOT;
            self.prev_sibling[i] = NO_SLOT;
            self.pose[i] = pose;
            self.local[i].set(Affine::IDENTITY);
            self.absolute[i].set(Affine::IDENTITY);
            self.inverse_absolute[i].set(Affine::IDENTITY);
            self.absolute_rotation[i].set(0.0);
            self.absolute_scale[i].set(Vec2::new(1.0, 1.0));
            self.dirty[i].set(Dirty::NEW);
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(NO_SLOT);
            self.first_child.push(NO_SLOT);
            self.last_child.push(NO_SLOT);
            self.next_sibling.push(NO_SLOT);
            self.prev_sibling.push(NO_SLOT);
            self.pose.push(pose);
            self.local.push(Cell::new(Affine::IDENTITY));
            self.absolute.push(Cell::new(Affine::IDENTITY));
            self.inverse_absolute.push(Cell::new(Affine::IDENTITY));
            self.absolute_rotation.push(Cell::new(0.0));
            self.absolute_scale.push(Cell::new(Vec2::new(1.0, 1.0)));
            self.dirty.push(Cell::new(Dirty::NEW));
            self.generation.push(0);
            idx
        };

        NodeId::new(idx, self.generation[idx as usize])
    }

    /// Creates a new node with the given local pose, appended as the last
    /// child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_child(&mut self, parent: NodeId, pose: Pose) -> NodeId {
        self.validate(parent);
        let id = self.create_node_with(pose);
        // A fresh node has no descendants, so this cannot form a cycle. It is
        // born dirty, so there is nothing to invalidate either.
        self.link_last(parent.idx, id.idx);
        id
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// The node is removed from its parent's child list. Its children are
    /// detached and become roots; their subtrees are invalidated since they
    /// lost the destroyed node's contribution.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;

        if self.parent[idx as usize] != NO_SLOT {
            self.unlink_from_parent(idx);
        }

        let mut child = self.first_child[idx as usize];
        while child != NO_SLOT {
            let next = self.next_sibling[child as usize];
            self.parent[child as usize] = NO_SLOT;
            self.prev_sibling[child as usize] = NO_SLOT;
            self.next_sibling[child as usize] = NO_SLOT;
            self.invalidate_subtree(child);
            child = next;
        }
        self.first_child[idx as usize] = NO_SLOT;
        self.last_child[idx as usize] = NO_SLOT;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns `true` if the store holds no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Topology API --

    /// Attaches `child` under `parent`, or detaches it when `parent` is
    /// `None`.
    ///
    /// The child is appended after its new siblings and its subtree is
    /// invalidated. Setting the current parent again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParentCycle`] if `parent` is `child` itself or one of
    /// its descendants. The hierarchy is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        self.validate(child);
        let c = child.idx;
        let new_p = match parent {
            Some(p) => {
                self.validate(p);
                p.idx
            }
            None => NO_SLOT,
        };

        if self.parent[c as usize] == new_p {
            return Ok(());
        }

        if let Some(p) = parent
            && self.is_ancestor_or_self(c, p.idx)
        {
            log::warn!("rejected re-parenting {child:?} under its descendant {p:?}");
            return Err(Error::ParentCycle { child, parent: p });
        }

        if self.parent[c as usize] != NO_SLOT {
            self.unlink_from_parent(c);
        }
        if new_p != NO_SLOT {
            self.link_last(new_p, c);
        }

        self.invalidate_subtree(c);
        Ok(())
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle_at(self.parent[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a node, in the order
    /// they were attached.
    #[must_use]
    pub fn children(&self, id: NodeId) -> NodeIter<'_> {
        self.validate(id);
        NodeIter::new(
            self.first_child[id.idx as usize],
            &self.next_sibling,
            &self.generation,
        )
    }

    /// Returns an iterator over the ancestors of a node, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> NodeIter<'_> {
        self.validate(id);
        NodeIter::new(self.parent[id.idx as usize], &self.parent, &self.generation)
    }

    /// Returns the handles of all live nodes without a parent.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == NO_SLOT && !self.free_list.contains(&idx))
            .map(|idx| NodeId::new(idx, self.generation[idx as usize]))
            .collect()
    }

    // -- Local property getters (no recomputation) --

    /// Returns the local pose of a node.
    #[must_use]
    pub fn pose(&self, id: NodeId) -> Pose {
        self.validate(id);
        self.pose[id.idx as usize]
    }

    /// Returns the local position of a node.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Point {
        self.pose(id).position
    }

    /// Returns the local rotation of a node, in radians.
    #[must_use]
    pub fn rotation(&self, id: NodeId) -> f64 {
        self.pose(id).rotation
    }

    /// Returns the local scale of a node.
    #[must_use]
    pub fn scale(&self, id: NodeId) -> Vec2 {
        self.pose(id).scale
    }

    // -- Mutation API (auto-invalidates) --

    /// Sets the whole local pose of a node.
    ///
    /// Marks the node's local matrix and its subtree's absolute matrices
    /// dirty, unless `pose` equals the current value.
    pub fn set_pose(&mut self, id: NodeId, pose: Pose) {
        self.validate(id);
        let idx = id.idx;
        if self.pose[idx as usize] == pose {
            return;
        }
        self.pose[idx as usize] = pose;
        self.invalidate_local(idx);
    }

    /// Sets the local position of a node.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        let pose = self.pose(id).with_position(position);
        self.set_pose(id, pose);
    }

    /// Sets the local rotation of a node, in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) {
        let pose = self.pose(id).with_rotation(rotation);
        self.set_pose(id, pose);
    }

    /// Sets the local scale of a node.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        let pose = self.pose(id).with_scale(scale);
        self.set_pose(id, pose);
    }

    /// Moves a node by `delta` in its parent's space.
    pub fn translate(&mut self, id: NodeId, delta: Vec2) {
        let position = self.position(id) + delta;
        self.set_position(id, position);
    }

    /// Adds `radians` to a node's local rotation.
    pub fn rotate(&mut self, id: NodeId, radians: f64) {
        let rotation = self.rotation(id) + radians;
        self.set_rotation(id, rotation);
    }

    /// Multiplies a node's local scale componentwise by `factor`.
    pub fn scale_by(&mut self, id: NodeId, factor: Vec2) {
        let s = self.scale(id);
        self.set_scale(id, Vec2::new(s.x * factor.x, s.y * factor.y));
    }

    // -- Lazy getters --

    /// Returns the local matrix (scale, then rotation, then translation).
    #[must_use]
    pub fn local(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.refresh_local(id.idx);
        self.local[id.idx as usize].get()
    }

    /// Returns the absolute matrix: the parent's absolute matrix composed
    /// with this node's local matrix, or the local matrix for a root.
    ///
    /// Maps points from this node's space to world space.
    #[must_use]
    pub fn absolute(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.refresh_absolute(id.idx);
        self.absolute[id.idx as usize].get()
    }

    /// Returns the inverse of [`absolute`](Self::absolute).
    ///
    /// Maps points from world space to this node's space. The result is not
    /// finite if any scale along the chain is zero.
    #[must_use]
    pub fn inverse_absolute(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.refresh_absolute(id.idx);
        self.inverse_absolute[id.idx as usize].get()
    }

    /// Returns the world-space position of the node's origin.
    #[must_use]
    pub fn absolute_position(&self, id: NodeId) -> Point {
        self.absolute(id) * Point::ORIGIN
    }

    /// Returns the sum of local rotations from the root down to this node.
    #[must_use]
    pub fn absolute_rotation(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.refresh_absolute(id.idx);
        self.absolute_rotation[id.idx as usize].get()
    }

    /// Returns the componentwise product of local scales from the root down
    /// to this node.
    #[must_use]
    pub fn absolute_scale(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.refresh_absolute(id.idx);
        self.absolute_scale[id.idx as usize].get()
    }

    /// Converts a world-space point into this node's space.
    #[must_use]
    pub fn to_local(&self, id: NodeId, absolute: Point) -> Point {
        self.inverse_absolute(id) * absolute
    }

    /// Converts a point in this node's space into world space.
    #[must_use]
    pub fn to_absolute(&self, id: NodeId, local: Point) -> Point {
        self.absolute(id) * local
    }

    // -- Diagnostics --

    /// Returns which caches of a node are currently stale.
    #[must_use]
    pub fn dirty(&self, id: NodeId) -> Dirty {
        self.validate(id);
        self.dirty[id.idx as usize].get()
    }

    /// Returns the cache counters accumulated since creation or the last
    /// [`reset_stats`](Self::reset_stats).
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats.get()
    }

    /// Zeroes the cache counters.
    pub fn reset_stats(&mut self) {
        self.stats.set(CacheStats::default());
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn handle_at(&self, idx: u32) -> Option<NodeId> {
        slot(idx).map(|idx| NodeId::new(idx, self.generation[idx as usize]))
    }

    /// Returns whether `ancestor` is `idx` or lies on `idx`'s parent chain.
    fn is_ancestor_or_self(&self, ancestor: u32, idx: u32) -> bool {
        NodeIter::new(idx, &self.parent, &self.generation).any(|n| n.idx == ancestor)
    }

    /// Appends `c` to the end of `p`'s child list.
    fn link_last(&mut self, p: u32, c: u32) {
        let last = self.last_child[p as usize];
        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = NO_SLOT;
        self.prev_sibling[c as usize] = last;
        if last == NO_SLOT {
            self.first_child[p as usize] = c;
        } else {
            self.next_sibling[last as usize] = c;
        }
        self.last_child[p as usize] = c;
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != NO_SLOT {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != NO_SLOT {
            self.prev_sibling[next as usize] = prev;
        } else {
            // Was last child.
            self.last_child[p as usize] = prev;
        }

        self.parent[idx as usize] = NO_SLOT;
        self.prev_sibling[idx as usize] = NO_SLOT;
        self.next_sibling[idx as usize] = NO_SLOT;
    }

    fn invalidate_local(&mut self, idx: u32) {
        let cell = &self.dirty[idx as usize];
        cell.set(cell.get() | Dirty::LOCAL);
        self.invalidate_subtree(idx);
    }

    /// Marks `idx` and every descendant absolute-dirty, depth-first.
    ///
    /// Subtrees whose root is already dirty are skipped: see the invariant in
    /// [`dirty`](super::dirty).
    fn invalidate_subtree(&mut self, idx: u32) {
        let mut stats = self.stats.get();
        self.stack.clear();
        self.stack.push(idx);
        while let Some(i) = self.stack.pop() {
            let cell = &self.dirty[i as usize];
            let flags = cell.get();
            if flags.contains(Dirty::ABSOLUTE) {
                continue;
            }
            cell.set(flags | Dirty::ABSOLUTE);
            stats.invalidations += 1;

            let mut child = self.first_child[i as usize];
            while child != NO_SLOT {
                self.stack.push(child);
                child = self.next_sibling[child as usize];
            }
        }
        self.stats.set(stats);
    }

    fn refresh_local(&self, idx: u32) {
        let cell = &self.dirty[idx as usize];
        let flags = cell.get();
        if !flags.contains(Dirty::LOCAL) {
            return;
        }
        self.local[idx as usize].set(self.pose[idx as usize].to_affine());
        cell.set(flags - Dirty::LOCAL);

        let mut stats = self.stats.get();
        stats.local_recomputes += 1;
        self.stats.set(stats);
    }

    /// Recomputes the absolute cache of `idx`, refreshing ancestors first.
    ///
    /// Recursion depth is bounded by the tree depth; `set_parent` keeps the
    /// parent chain acyclic.
    fn refresh_absolute(&self, idx: u32) {
        self.refresh_local(idx);
        let i = idx as usize;
        let flags = self.dirty[i].get();
        if !flags.contains(Dirty::ABSOLUTE) {
            return;
        }

        let local = self.local[i].get();
        let pose = self.pose[i];
        let p = self.parent[i];
        let (absolute, rotation, scale) = if p == NO_SLOT {
            (local, pose.rotation, pose.scale)
        } else {
            self.refresh_absolute(p);
            let pi = p as usize;
            let parent_scale = self.absolute_scale[pi].get();
            (
                self.absolute[pi].get() * local,
                self.absolute_rotation[pi].get() + pose.rotation,
                Vec2::new(parent_scale.x * pose.scale.x, parent_scale.y * pose.scale.y),
            )
        };

        self.absolute[i].set(absolute);
        self.inverse_absolute[i].set(absolute.inverse());
        self.absolute_rotation[i].set(rotation);
        self.absolute_scale[i].set(scale);
        self.dirty[i].set(flags - Dirty::ABSOLUTE);

        let mut stats = self.stats.get();
        stats.absolute_recomputes += 1;
        self.stats.set(stats);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const EPS: f64 = 1e-4;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < EPS
    }

    /// Builds `root -> mid -> leaf` and returns the three handles.
    fn chain(store: &mut TransformStore) -> (NodeId, NodeId, NodeId) {
        let root = store.create_node();
        let mid = store.create_node();
        let leaf = store.create_node();
        store.set_parent(mid, Some(root)).unwrap();
        store.set_parent(leaf, Some(mid)).unwrap();
        (root, mid, leaf)
    }

    #[test]
    fn create_and_destroy() {
        let mut store = TransformStore::new();
        let id = store.create_node();
        assert!(store.is_alive(id));
        assert_eq!(store.len(), 1);
        store.destroy_node(id);
        assert!(!store.is_alive(id));
        assert!(store.is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = TransformStore::new();
        let id1 = store.create_node();
        store.destroy_node(id1);
        let id2 = store.create_node();
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn reused_slot_starts_fresh() {
        let mut store = TransformStore::new();
        let id1 = store.create_node_with(Pose::from_position(Point::new(9.0, 9.0)));
        let _ = store.absolute(id1);
        store.destroy_node(id1);

        let id2 = store.create_node();
        assert_eq!(store.pose(id2), Pose::IDENTITY);
        assert_eq!(store.absolute(id2), Affine::IDENTITY);
        assert_eq!(store.parent(id2), None);
    }

    #[test]
    fn set_parent_and_query() {
        let mut store = TransformStore::new();
        let parent = store.create_node();
        let child1 = store.create_node();
        let child2 = store.create_node();

        store.set_parent(child1, Some(parent)).unwrap();
        store.set_parent(child2, Some(parent)).unwrap();

        assert_eq!(store.parent(child1), Some(parent));
        assert_eq!(store.parent(child2), Some(parent));
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
    }

    #[test]
    fn reparent_moves_between_child_lists() {
        let mut store = TransformStore::new();
        let p1 = store.create_node();
        let p2 = store.create_node();
        let a = store.create_node();
        let b = store.create_node();
        let c = store.create_node();
        store.set_parent(a, Some(p1)).unwrap();
        store.set_parent(b, Some(p1)).unwrap();
        store.set_parent(c, Some(p1)).unwrap();

        // Middle, then last, then first.
        store.set_parent(b, Some(p2)).unwrap();
        assert_eq!(store.children(p1).collect::<Vec<_>>(), vec![a, c]);
        store.set_parent(c, Some(p2)).unwrap();
        store.set_parent(a, None).unwrap();

        assert!(store.children(p1).next().is_none());
        assert_eq!(store.children(p2).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(store.parent(a), None);
    }

    #[test]
    fn setting_same_parent_is_noop() {
        let mut store = TransformStore::new();
        let (root, mid, _) = chain(&mut store);
        let _ = store.absolute(mid);
        store.reset_stats();

        store.set_parent(mid, Some(root)).unwrap();
        assert_eq!(store.stats().invalidations, 0);
        assert_eq!(store.children(root).count(), 1);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut store = TransformStore::new();
        let (root, mid, leaf) = chain(&mut store);

        assert_eq!(
            store.set_parent(root, Some(leaf)),
            Err(Error::ParentCycle {
                child: root,
                parent: leaf
            })
        );
        assert!(store.set_parent(mid, Some(mid)).is_err());

        // Hierarchy untouched.
        assert_eq!(store.parent(root), None);
        assert_eq!(store.parent(leaf), Some(mid));
        assert_eq!(store.parent(mid), Some(root));
    }

    #[test]
    fn roots_returns_parentless_nodes() {
        let mut store = TransformStore::new();
        let a = store.create_node();
        let b = store.create_node();
        let c = store.create_node();
        let d = store.create_node();
        store.set_parent(c, Some(a)).unwrap();
        store.destroy_node(d);

        let roots = store.roots();
        assert!(roots.contains(&a));
        assert!(roots.contains(&b));
        assert!(!roots.contains(&c));
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn destroy_detaches_from_parent_and_orphans_children() {
        let mut store = TransformStore::new();
        let (root, mid, leaf) = chain(&mut store);
        store.set_position(root, Point::new(10.0, 0.0));
        store.set_position(mid, Point::new(5.0, 0.0));
        assert!(close(store.absolute_position(leaf), Point::new(15.0, 0.0)));

        store.destroy_node(mid);
        assert!(store.children(root).next().is_none());
        assert_eq!(store.parent(leaf), None);
        // Leaf lost both ancestors' contributions.
        assert!(close(store.absolute_position(leaf), Point::ORIGIN));
    }

    #[test]
    fn absolute_composes_through_chain() {
        let mut store = TransformStore::new();
        let (root, mid, leaf) = chain(&mut store);
        store.set_pose(
            root,
            Pose::new(Point::new(100.0, 0.0), FRAC_PI_2, Vec2::new(2.0, 2.0)),
        );
        store.set_position(mid, Point::new(10.0, 0.0));
        store.set_scale(leaf, Vec2::new(0.5, 3.0));
        store.set_rotation(leaf, 0.25);

        // Mid's local (10, 0) is scaled to (20, 0), rotated to (0, 20), moved
        // to (100, 20).
        assert!(close(store.absolute_position(mid), Point::new(100.0, 20.0)));
        assert!(close(store.absolute_position(leaf), Point::new(100.0, 20.0)));
        assert!((store.absolute_rotation(leaf) - (FRAC_PI_2 + 0.25)).abs() < EPS);
        assert_eq!(store.absolute_scale(leaf), Vec2::new(1.0, 6.0));
        assert_eq!(
            store.absolute(leaf),
            store.absolute(root) * store.local(mid) * store.local(leaf)
        );
    }

    #[test]
    fn reading_twice_does_no_extra_work() {
        let mut store = TransformStore::new();
        let (root, _, leaf) = chain(&mut store);
        store.set_rotation(root, 0.3);

        let first = store.absolute(leaf);
        let after_first = store.stats();
        let second = store.absolute(leaf);
        let _ = store.inverse_absolute(leaf);
        let _ = store.absolute_scale(leaf);

        assert_eq!(first, second);
        assert_eq!(store.stats(), after_first);
        assert!(store.dirty(leaf).is_empty());
        assert_eq!(after_first.absolute_recomputes, 3);
    }

    #[test]
    fn root_rotation_reaches_every_descendant() {
        let mut store = TransformStore::new();
        let (root, mid, leaf) = chain(&mut store);
        let tip = store.create_node();
        store.set_parent(tip, Some(leaf)).unwrap();
        store.set_position(mid, Point::new(1.0, 0.0));
        store.set_position(leaf, Point::new(1.0, 0.0));
        store.set_position(tip, Point::new(1.0, 0.0));

        // Warm every cache.
        assert!(close(store.absolute_position(tip), Point::new(3.0, 0.0)));
        assert!(close(store.absolute_position(mid), Point::new(1.0, 0.0)));

        store.set_rotation(root, PI);
        assert!(close(store.absolute_position(mid), Point::new(-1.0, 0.0)));
        assert!(close(store.absolute_position(leaf), Point::new(-2.0, 0.0)));
        assert!(close(store.absolute_position(tip), Point::new(-3.0, 0.0)));
    }

    #[test]
    fn invalidation_visits_each_node_once() {
        let mut store = TransformStore::new();
        let (root, mid, leaf) = chain(&mut store);
        let sibling = store.create_node();
        store.set_parent(sibling, Some(mid)).unwrap();
        let _ = store.absolute(leaf);
        let _ = store.absolute(sibling);
        store.reset_stats();

        store.set_rotation(root, 1.0);
        assert_eq!(store.stats().invalidations, 4);

        // Subtree already dirty: nothing new to mark.
        store.set_rotation(mid, 1.0);
        assert_eq!(store.stats().invalidations, 4);
    }

    #[test]
    fn equal_values_do_not_invalidate() {
        let mut store = TransformStore::new();
        let id = store.create_node_with(Pose::from_position(Point::new(3.0, 4.0)));
        let _ = store.absolute(id);
        store.reset_stats();

        store.set_position(id, Point::new(3.0, 4.0));
        store.set_rotation(id, 0.0);
        store.set_scale(id, Vec2::new(1.0, 1.0));
        let _ = store.absolute(id);
        assert_eq!(store.stats(), CacheStats::default());
    }

    #[test]
    fn reparenting_invalidates_subtree() {
        let mut store = TransformStore::new();
        let a = store.create_node_with(Pose::from_position(Point::new(10.0, 0.0)));
        let b = store.create_node_with(Pose::from_position(Point::new(0.0, 10.0)));
        let child = store.create_node();
        let grandchild = store.create_node_with(Pose::from_position(Point::new(1.0, 1.0)));
        store.set_parent(grandchild, Some(child)).unwrap();
        store.set_parent(child, Some(a)).unwrap();
        assert!(close(store.absolute_position(grandchild), Point::new(11.0, 1.0)));

        store.set_parent(child, Some(b)).unwrap();
        assert!(close(store.absolute_position(grandchild), Point::new(1.0, 11.0)));
    }

    #[test]
    fn relative_helpers() {
        let mut store = TransformStore::new();
        let id = store.create_node();
        store.translate(id, Vec2::new(2.0, 3.0));
        store.translate(id, Vec2::new(1.0, 1.0));
        store.rotate(id, 0.5);
        store.rotate(id, 0.25);
        store.scale_by(id, Vec2::new(2.0, 4.0));
        store.scale_by(id, Vec2::new(0.5, 0.5));

        assert_eq!(store.position(id), Point::new(3.0, 4.0));
        assert_eq!(store.rotation(id), 0.75);
        assert_eq!(store.scale(id), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn local_and_absolute_round_trip() {
        let mut store = TransformStore::new();
        let (root, mid, leaf) = chain(&mut store);
        store.set_pose(
            root,
            Pose::new(Point::new(-40.0, 12.5), 0.7, Vec2::new(1.5, 0.75)),
        );
        store.set_pose(mid, Pose::new(Point::new(3.0, -8.0), -2.1, Vec2::new(4.0, 4.0)));
        store.set_pose(leaf, Pose::new(Point::new(0.5, 0.5), 0.1, Vec2::new(0.2, 1.0)));

        for node in [root, mid, leaf] {
            for p in [
                Point::ORIGIN,
                Point::new(1.0, 2.0),
                Point::new(-300.0, 45.5),
                Point::new(1e3, -1e3),
            ] {
                let there = store.to_absolute(node, p);
                let back = store.to_local(node, there);
                assert!(close(back, p), "{p:?} -> {there:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn create_child_links_and_composes() {
        let mut store = TransformStore::new();
        let root = store.create_node_with(Pose::from_position(Point::new(10.0, 0.0)));
        let a = store.create_child(root, Pose::IDENTITY);
        let b = store.create_child(root, Pose::from_position(Point::new(0.0, 5.0)));
        assert_eq!(store.parent(b), Some(root));
        assert_eq!(store.children(root).collect::<Vec<_>>(), vec![a, b]);
        assert!(close(store.absolute_position(b), Point::new(10.0, 5.0)));
    }

    #[test]
    fn ancestors_walk_to_the_root() {
        let mut store = TransformStore::new();
        let root = store.create_node();
        let mid = store.create_child(root, Pose::IDENTITY);
        let leaf = store.create_child(mid, Pose::IDENTITY);
        assert_eq!(store.ancestors(leaf).collect::<Vec<_>>(), vec![mid, root]);
        assert!(store.ancestors(root).next().is_none());

        store.set_parent(mid, None).unwrap();
        assert_eq!(store.ancestors(leaf).collect::<Vec<_>>(), vec![mid]);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_absolute() {
        let mut store = TransformStore::new();
        let id = store.create_node();
        store.destroy_node(id);
        let _ = store.absolute(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_position() {
        let mut store = TransformStore::new();
        let id = store.create_node();
        store.destroy_node(id);
        store.set_position(id, Point::new(1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_parent() {
        let mut store = TransformStore::new();
        let root = store.create_node();
        let id = store.create_node();
        store.destroy_node(id);
        let _ = store.set_parent(root, Some(id));
    }
}
