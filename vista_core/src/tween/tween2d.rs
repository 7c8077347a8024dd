// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpolation of a node's pose between two snapshots.

use core::time::Duration;

use crate::easing::EaseFn;
use crate::error::{Error, Result};
use crate::transform::{NodeId, Pose, TransformStore};

/// Drives a node's local pose from `from` to `to` over a fixed duration.
///
/// Each update writes `from.lerp(to, ease(t))` to the target, where `t` is the
/// clamped fraction of the duration elapsed so far. [`reset`](Self::reset)
/// snaps the target back to `from`.
#[derive(Clone, Debug)]
pub struct Tween2d {
    target: NodeId,
    from: Pose,
    to: Pose,
    ease: EaseFn,
    elapsed: Duration,
    duration: Duration,
    finished: bool,
}

impl Tween2d {
    /// Creates a tween of `target` between two explicit poses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveDuration`] if `duration` is zero.
    pub fn new(
        duration: Duration,
        target: NodeId,
        from: Pose,
        to: Pose,
        ease: impl Into<EaseFn>,
    ) -> Result<Self> {
        if duration.is_zero() {
            return Err(Error::NonPositiveDuration);
        }
        Ok(Self {
            target,
            from,
            to,
            ease: ease.into(),
            elapsed: Duration::ZERO,
            duration,
            finished: false,
        })
    }

    /// Creates a tween that starts from `target`'s current pose.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveDuration`] if `duration` is zero.
    ///
    /// # Panics
    ///
    /// Panics if `target` is stale.
    pub fn from_current(
        store: &TransformStore,
        duration: Duration,
        target: NodeId,
        to: Pose,
        ease: impl Into<EaseFn>,
    ) -> Result<Self> {
        Self::new(duration, target, store.pose(target), to, ease)
    }

    /// The node being animated.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Starting pose.
    #[must_use]
    pub const fn from(&self) -> Pose {
        self.from
    }

    /// Final pose.
    #[must_use]
    pub const fn to(&self) -> Pose {
        self.to
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

    /// Whether the target has reached `to`.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Linear progress in `[0, 1]`, before easing.
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Rewinds to zero elapsed time and snaps the target to `from`.
    ///
    /// # Panics
    ///
    /// Panics if the target node has been destroyed.
    pub fn reset(&mut self, store: &mut TransformStore) {
        self.elapsed = Duration::ZERO;
        self.finished = false;
        store.set_pose(self.target, self.from);
    }

    /// Advances by `dt` and writes the interpolated pose to the target;
    /// returns whether the tween is finished.
    ///
    /// # Panics
    ///
    /// Panics if the target node has been destroyed.
    pub fn advance(&mut self, dt: Duration, store: &mut TransformStore) -> bool {
        if self.finished {
            return true;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        let t = self.progress();
        let amount = (self.ease)(t);
        store.set_pose(self.target, self.from.lerp(&self.to, amount));
        self.finished = t >= 1.0;
        self.finished
    }
}
