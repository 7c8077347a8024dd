// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven state changers.
//!
//! A [`Tween`] is one of a closed set of variants: [`Delay`], [`Tween2d`],
//! [`Sequence`], [`Parallel`] and [`Repeat`]. Composites own their children,
//! so a whole animation is a single tree value that can be handed to
//! [`Camera::play`](crate::camera::Camera::play) or driven directly.
//!
//! Time is a [`Duration`]. Every variant reports the same three quantities:
//!
//! - [`time`](Tween::time): how much has been consumed, never more than
//!   `duration`.
//! - [`duration`](Tween::duration): total length, [`Duration::MAX`] when
//!   unbounded.
//! - [`is_finished`](Tween::is_finished): whether further updates are no-ops.
//!
//! Updating a finished tween does nothing and reports `true`.
//!
//! Tweens that animate nodes take the [`TransformStore`] as an argument on
//! every call rather than holding a reference to it, so any number of them
//! may target the same store.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use vista_core::easing::Ease;
//! use vista_core::transform::{Pose, TransformStore};
//! use vista_core::tween::{RepeatCount, Tween};
//!
//! let mut store = TransformStore::new();
//! let node = store.create_node();
//! let there = Pose::from_position(Point::new(100.0, 0.0));
//!
//! let mut bounce = Tween::repeat(
//!     Tween::sequence([
//!         Tween::tween2d(Duration::from_secs(1), node, Pose::IDENTITY, there, Ease::InOut)?,
//!         Tween::tween2d(Duration::from_secs(1), node, there, Pose::IDENTITY, Ease::InOut)?,
//!     ]),
//!     RepeatCount::Finite(2),
//! );
//! assert_eq!(bounce.duration(), Duration::from_secs(4));
//!
//! bounce.advance(Duration::from_secs(1), &mut store);
//! assert_eq!(store.position(node), Point::new(100.0, 0.0));
//! # Ok::<(), vista_core::Error>(())
//! ```

mod delay;
mod parallel;
mod repeat;
mod sequence;
mod tween2d;

use core::time::Duration;

pub use delay::Delay;
pub use parallel::Parallel;
pub use repeat::{Repeat, RepeatCount};
pub use sequence::Sequence;
pub use tween2d::Tween2d;

use crate::easing::EaseFn;
use crate::error::{Error, Result};
use crate::transform::{NodeId, Pose, TransformStore};

/// Converts a host-supplied number of seconds into a [`Duration`].
///
/// # Errors
///
/// Returns [`Error::InvalidSeconds`] if `secs` is negative, NaN, or too large
/// to represent.
pub fn seconds(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidSeconds(secs))
}

/// Coarse lifecycle of a tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenState {
    /// Not yet advanced past zero.
    Pending,
    /// Some time consumed, not finished.
    Running,
    /// Further updates are no-ops.
    Finished,
}

/// A time-driven state changer.
#[derive(Clone, Debug)]
pub enum Tween {
    /// Wait without side effects.
    Delay(Delay),
    /// Interpolate a node's pose.
    Tween2d(Tween2d),
    /// Run children one after another.
    Sequence(Sequence),
    /// Run children side by side.
    Parallel(Parallel),
    /// Replay a child.
    Repeat(Repeat),
}

impl Tween {
    /// A [`Delay`] of `duration`.
    #[must_use]
    pub const fn delay(duration: Duration) -> Self {
        Self::Delay(Delay::new(duration))
    }

    /// A [`Tween2d`] of `target` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveDuration`] if `duration` is zero.
    pub fn tween2d(
        duration: Duration,
        target: NodeId,
        from: Pose,
        to: Pose,
        ease: impl Into<EaseFn>,
    ) -> Result<Self> {
        Tween2d::new(duration, target, from, to, ease).map(Self::Tween2d)
    }

    /// A [`Tween2d`] of `target` from its current pose to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveDuration`] if `duration` is zero.
    pub fn tween2d_from_current(
        store: &TransformStore,
        duration: Duration,
        target: NodeId,
        to: Pose,
        ease: impl Into<EaseFn>,
    ) -> Result<Self> {
        Tween2d::from_current(store, duration, target, to, ease).map(Self::Tween2d)
    }

    /// A [`Sequence`] of `children`.
    #[must_use]
    pub fn sequence(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Sequence(Sequence::new(children))
    }

    /// A [`Parallel`] group of `children`.
    #[must_use]
    pub fn parallel(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Parallel(Parallel::new(children))
    }

    /// A [`Repeat`] of `child`.
    #[must_use]
    pub fn repeat(child: Self, count: RepeatCount) -> Self {
        Self::Repeat(Repeat::new(child, count))
    }

    /// Time consumed so far.
    #[must_use]
    pub fn time(&self) -> Duration {
        match self {
            Self::Delay(t) => t.time(),
            Self::Tween2d(t) => t.time(),
            Self::Sequence(t) => t.time(),
            Self::Parallel(t) => t.time(),
            Self::Repeat(t) => t.time(),
        }
    }

    /// Total length; [`Duration::MAX`] when unbounded.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            Self::Delay(t) => t.duration(),
            Self::Tween2d(t) => t.duration(),
            Self::Sequence(t) => t.duration(),
            Self::Parallel(t) => t.duration(),
            Self::Repeat(t) => t.duration(),
        }
    }

    /// Whether further updates are no-ops.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match self {
            Self::Delay(t) => t.is_finished(),
            Self::Tween2d(t) => t.is_finished(),
            Self::Sequence(t) => t.is_finished(),
            Self::Parallel(t) => t.is_finished(),
            Self::Repeat(t) => t.is_finished(),
        }
    }

    /// Coarse lifecycle derived from [`time`](Self::time) and
    /// [`is_finished`](Self::is_finished).
    #[must_use]
    pub fn state(&self) -> TweenState {
        if self.is_finished() {
            TweenState::Finished
        } else if self.time().is_zero() {
            TweenState::Pending
        } else {
            TweenState::Running
        }
    }

    /// Rewinds to the initial state, recursively. Pose tweens snap their
    /// target back to their starting pose.
    ///
    /// # Panics
    ///
    /// Panics if a pose tween's target node has been destroyed.
    pub fn reset(&mut self, store: &mut TransformStore) {
        match self {
            Self::Delay(t) => t.reset(),
            Self::Tween2d(t) => t.reset(store),
            Self::Sequence(t) => t.reset(store),
            Self::Parallel(t) => t.reset(store),
            Self::Repeat(t) => t.reset(store),
        }
    }

    /// Advances by `dt`; returns whether the tween is finished.
    ///
    /// # Panics
    ///
    /// Panics if a pose tween's target node has been destroyed.
    pub fn advance(&mut self, dt: Duration, store: &mut TransformStore) -> bool {
        match self {
            Self::Delay(t) => t.advance(dt),
            Self::Tween2d(t) => t.advance(dt, store),
            Self::Sequence(t) => t.advance(dt, store),
            Self::Parallel(t) => t.advance(dt, store),
            Self::Repeat(t) => t.advance(dt, store),
        }
    }
}

impl From<Delay> for Tween {
    fn from(t: Delay) -> Self {
        Self::Delay(t)
    }
}

impl From<Tween2d> for Tween {
    fn from(t: Tween2d) -> Self {
        Self::Tween2d(t)
    }
}

impl From<Sequence> for Tween {
    fn from(t: Sequence) -> Self {
        Self::Sequence(t)
    }
}

impl From<Parallel> for Tween {
    fn from(t: Parallel) -> Self {
        Self::Parallel(t)
    }
}

impl From<Repeat> for Tween {
    fn from(t: Repeat) -> Self {
        Self::Repeat(t)
    }
}
