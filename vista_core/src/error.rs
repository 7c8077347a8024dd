// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Every error is raised synchronously at the point of misuse. None of them
//! describe a runtime condition to retry: a host that observes one has a bug
//! in how it configures tweens, cameras, or the transform hierarchy.
//!
//! Stale [`NodeId`] handles are not reported through this type. Like any
//! other out-of-bounds access they panic immediately.

use crate::transform::NodeId;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while configuring tweens and cameras or editing the
/// transform hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A tween that interpolates over time was given a zero duration.
    ///
    /// Zero-length [`Delay`](crate::tween::Delay)s are allowed.
    #[error("tween duration must be positive")]
    NonPositiveDuration,

    /// A repeat count below `-1` was supplied (`-1` means "forever").
    #[error("invalid repeat count {0}: expected -1 (infinite) or a non-negative count")]
    InvalidRepeatCount(i32),

    /// A host-supplied number of seconds was negative, NaN, or too large.
    #[error("invalid number of seconds: {0}")]
    InvalidSeconds(f64),

    /// A camera logical width or height was not a positive finite number.
    #[error("logical viewport size must be positive and finite, got {width}x{height}")]
    InvalidLogicalSize {
        /// Requested logical width.
        width: f64,
        /// Requested logical height.
        height: f64,
    },

    /// Attaching `child` under `parent` would make `child` its own ancestor.
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    ParentCycle {
        /// Node being re-parented.
        child: NodeId,
        /// Requested parent, which is `child` itself or one of its descendants.
        parent: NodeId,
    },
}

impl Error {
    /// Returns `true` for errors caused by invalid construction parameters.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NonPositiveDuration
                | Self::InvalidRepeatCount(_)
                | Self::InvalidSeconds(_)
                | Self::InvalidLogicalSize { .. }
        )
    }

    /// Returns `true` for errors that would have corrupted the transform
    /// hierarchy.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::ParentCycle { .. })
    }
}
