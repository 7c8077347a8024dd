// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walks along the store's slot links.

use core::iter::FusedIterator;

use super::id::{NO_SLOT, NodeId};

/// `Some(idx)` unless `idx` is the "no node" sentinel.
pub(crate) fn slot(idx: u32) -> Option<u32> {
    (idx != NO_SLOT).then_some(idx)
}

/// Nodes reached by repeatedly following one link column: sibling links for
/// [`TransformStore::children`], parent links for
/// [`TransformStore::ancestors`].
///
/// [`TransformStore::children`]: super::TransformStore::children
/// [`TransformStore::ancestors`]: super::TransformStore::ancestors
#[derive(Clone, Debug)]
pub struct NodeIter<'a> {
    next: Option<u32>,
    links: &'a [u32],
    generation: &'a [u32],
}

impl<'a> NodeIter<'a> {
    pub(crate) fn new(start: u32, links: &'a [u32], generation: &'a [u32]) -> Self {
        Self {
            next: slot(start),
            links,
            generation,
        }
    }
}

impl Iterator for NodeIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let idx = self.next?;
        self.next = slot(self.links[idx as usize]);
        Some(NodeId::new(idx, self.generation[idx as usize]))
    }
}

impl FusedIterator for NodeIter<'_> {}
