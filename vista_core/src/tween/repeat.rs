// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replaying a child a fixed number of times, or forever.

use alloc::boxed::Box;
use core::time::Duration;

use super::Tween;
use crate::error::Error;
use crate::transform::TransformStore;

/// How many times a [`Repeat`] plays its child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RepeatCount {
    /// Play exactly this many times. Zero finishes immediately.
    Finite(u32),
    /// Loop forever.
    Infinite,
}

impl TryFrom<i32> for RepeatCount {
    type Error = Error;

    /// `-1` maps to [`Infinite`](Self::Infinite); other negatives are
    /// rejected.
    fn try_from(count: i32) -> Result<Self, Error> {
        match count {
            -1 => Ok(Self::Infinite),
            n => u32::try_from(n)
                .map(Self::Finite)
                .map_err(|_| Error::InvalidRepeatCount(n)),
        }
    }
}

/// Plays its child repeatedly, resetting it between plays.
///
/// The remaining time of the update in which the child finishes is not carried
/// into the next play.
#[derive(Clone, Debug)]
pub struct Repeat {
    child: Box<Tween>,
    count: RepeatCount,
    completed: u32,
}

impl Repeat {
    /// Creates a repeat of `child`.
    #[must_use]
    pub fn new(child: Tween, count: RepeatCount) -> Self {
        Self {
            child: Box::new(child),
            count,
            completed: 0,
        }
    }

    /// The repeated child.
    #[must_use]
    pub fn child(&self) -> &Tween {
        &self.child
    }

    /// The configured repeat count.
    #[must_use]
    pub const fn count(&self) -> RepeatCount {
        self.count
    }

    /// Number of plays completed so far.
    #[must_use]
    pub const fn completed(&self) -> u32 {
        self.completed
    }

    /// Completed plays times the child's duration, plus the child's time.
    #[must_use]
    pub fn time(&self) -> Duration {
        if self.is_finished() {
            return self.duration();
        }
        self.child
            .duration()
            .saturating_mul(self.completed)
            .saturating_add(self.child.time())
    }

    /// The child's duration times the count, or [`Duration::MAX`] when
    /// infinite.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self.count {
            RepeatCount::Finite(n) => self.child.duration().saturating_mul(n),
            RepeatCount::Infinite => Duration::MAX,
        }
    }

    /// Whether the configured number of plays has completed. Never true for
    /// an infinite repeat.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        match self.count {
            RepeatCount::Finite(n) => self.completed >= n,
            RepeatCount::Infinite => false,
        }
    }

    /// Clears the completed count and rewinds the child.
    pub fn reset(&mut self, store: &mut TransformStore) {
        self.completed = 0;
        self.child.reset(store);
    }

    /// Advances the child by `dt`, rewinding it whenever it finishes and
    /// plays remain; returns whether the repeat is finished.
    pub fn advance(&mut self, dt: Duration, store: &mut TransformStore) -> bool {
        if self.is_finished() {
            return true;
        }
        if self.child.advance(dt, store) {
            self.completed = self.completed.saturating_add(1);
            if !self.is_finished() {
                self.child.reset(store);
            }
        }
        self.is_finished()
    }
}
