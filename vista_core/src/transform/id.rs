// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node handles.

use core::fmt;

/// Slot link value meaning "no node".
pub(crate) const NO_SLOT: u32 = u32::MAX;

/// A handle to a node in a [`TransformStore`](super::TransformStore).
///
/// A handle names a slot and the generation the slot had when the node was
/// created. Destroying the node bumps the generation, so old handles are
/// caught even after the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Slot this node lives in. Slots are reused, so this is only useful for
    /// diagnostics.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// How many times the slot had been recycled when this handle was made.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.idx, self.generation)
    }
}
