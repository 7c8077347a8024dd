// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Children run side by side.

use alloc::vec::Vec;
use core::time::Duration;

use super::Tween;
use crate::transform::TransformStore;

/// Advances all unfinished children on every update.
///
/// Finishes when the last child does. An empty parallel is finished from the
/// start.
#[derive(Clone, Debug)]
pub struct Parallel {
    children: Vec<Tween>,
}

impl Parallel {
    /// Creates a parallel group.
    #[must_use]
    pub fn new(children: impl IntoIterator<Item = Tween>) -> Self {
        Self {
            children: children.into_iter().collect(),
        }
    }

    /// The children.
    #[must_use]
    pub fn children(&self) -> &[Tween] {
        &self.children
    }

    /// Time of the furthest-along child.
    #[must_use]
    pub fn time(&self) -> Duration {
        self.children
            .iter()
            .map(Tween::time)
            .max()
            .unwrap_or_default()
    }

    /// Duration of the longest child.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.children
            .iter()
            .map(Tween::duration)
            .max()
            .unwrap_or_default()
    }

    /// Whether every child has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.children.iter().all(Tween::is_finished)
    }

    /// Rewinds every child, last to first.
    pub fn reset(&mut self, store: &mut TransformStore) {
        for child in self.children.iter_mut().rev() {
            child.reset(store);
        }
    }

    /// Advances every unfinished child by `dt`; returns whether all of them
    /// are finished.
    pub fn advance(&mut self, dt: Duration, store: &mut TransformStore) -> bool {
        let mut finished = true;
        for child in &mut self.children {
            if !child.is_finished() {
                finished &= child.advance(dt, store);
            }
        }
        finished
    }
}
