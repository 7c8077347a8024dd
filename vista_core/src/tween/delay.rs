// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload-free waiting.

use core::time::Duration;

/// Waits for a fixed amount of time and does nothing else.
///
/// Mostly useful inside a [`Sequence`](super::Sequence). A zero-length delay
/// is allowed and finishes on its first update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delay {
    elapsed: Duration,
    duration: Duration,
    finished: bool,
}

impl Delay {
    /// Creates a delay of `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
            finished: false,
        }
    }

    /// Elapsed time, never more than [`duration`](Self::duration).
    #[must_use]
    pub const fn time(&self) -> Duration {
        self.elapsed
    }

    /// Total length.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Rewinds to zero elapsed time.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }

    /// Advances by `dt`; returns whether the delay is finished.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.finished {
            self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
            self.finished = self.elapsed >= self.duration;
        }
        self.finished
    }
}
