// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node dirty flags.
//!
//! Each node carries two flags:
//!
//! - [`LOCAL`](Dirty::LOCAL) — local position, rotation, or scale changed;
//!   the local matrix must be recomposed.
//! - [`ABSOLUTE`](Dirty::ABSOLUTE) — the node or one of its ancestors changed,
//!   or the node was re-parented; the absolute matrix, its inverse, and the
//!   absolute position/rotation/scale must be recomputed.
//!
//! `ABSOLUTE` propagates to descendants, `LOCAL` does not. Whenever a node is
//! `ABSOLUTE`-dirty, so is every node below it: reading a child always
//! refreshes its ancestors first, and marking a node always marks its whole
//! subtree. Invalidation uses this to stop descending at subtrees that are
//! already dirty.
//!
//! Flags are only cleared by the lazy getters on
//! [`TransformStore`](super::TransformStore).

bitflags::bitflags! {
    /// Invalidation state of a single transform node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Dirty: u8 {
        /// Local matrix is stale.
        const LOCAL = 1 << 0;
        /// Absolute matrix, inverse, and absolute components are stale.
        const ABSOLUTE = 1 << 1;
    }
}

impl Dirty {
    /// State of a freshly created node: nothing has been computed yet.
    pub const NEW: Self = Self::all();
}
