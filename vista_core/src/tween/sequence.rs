// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Children run one after another.

use alloc::vec::Vec;
use core::time::Duration;

use super::Tween;
use crate::transform::TransformStore;

/// Runs its children strictly one after another.
///
/// Only the current child is advanced on each update. When it finishes, the
/// remaining time of that update is not carried over; the next child starts on
/// the following update. An empty sequence is finished from the start.
#[derive(Clone, Debug)]
pub struct Sequence {
    children: Vec<Tween>,
    current: usize,
}

impl Sequence {
    /// Creates a sequence from its children, in order.
    #[must_use]
    pub fn new(children: impl IntoIterator<Item = Tween>) -> Self {
        Self {
            children: children.into_iter().collect(),
            current: 0,
        }
    }

    /// The children, in order.
    #[must_use]
    pub fn children(&self) -> &[Tween] {
        &self.children
    }

    /// Index of the child currently running, or the number of children once
    /// finished.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Sum of the durations of completed children plus the current child's
    /// time.
    #[must_use]
    pub fn time(&self) -> Duration {
        let done = sum(self.children[..self.current].iter().map(Tween::duration));
        match self.children.get(self.current) {
            Some(child) => done.saturating_add(child.time()),
            None => done,
        }
    }

    /// Sum of the children's durations.
    #[must_use]
    pub fn duration(&self) -> Duration {
        sum(self.children.iter().map(Tween::duration))
    }

    /// Whether every child has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.children.len()
    }

    /// Rewinds every child and restarts from the first.
    ///
    /// Children are reset last to first so that when several of them animate
    /// the same node, the first child's starting state is what remains.
    pub fn reset(&mut self, store: &mut TransformStore) {
        for child in self.children.iter_mut().rev() {
            child.reset(store);
        }
        self.current = 0;
    }

    /// Advances the current child by `dt`; returns whether the whole sequence
    /// is finished.
    pub fn advance(&mut self, dt: Duration, store: &mut TransformStore) -> bool {
        if let Some(child) = self.children.get_mut(self.current)
            && child.advance(dt, store)
        {
            self.current += 1;
        }
        self.is_finished()
    }
}

fn sum(durations: impl Iterator<Item = Duration>) -> Duration {
    durations.fold(Duration::ZERO, Duration::saturating_add)
}
