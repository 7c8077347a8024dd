// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-running motion of a node.
//!
//! Unlike tweens, these have no duration: they integrate per-second rates
//! every time the host calls `update`, until the host stops calling it.

use core::time::Duration;

use kurbo::Vec2;

use crate::transform::{NodeId, Pose, TransformStore};

/// Per-second rates of change applied to a node's local pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    target: NodeId,
    /// Position change per second.
    pub position: Vec2,
    /// Rotation change per second, in radians.
    pub rotation: f64,
    /// Scale change per second, added componentwise.
    pub scale: Vec2,
}

impl Velocity {
    /// Creates a velocity at rest for `target`.
    #[must_use]
    pub const fn new(target: NodeId) -> Self {
        Self {
            target,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ZERO,
        }
    }

    /// The node being moved.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Is every rate zero?
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.position == Vec2::ZERO && self.rotation == 0.0 && self.scale == Vec2::ZERO
    }

    /// Integrates the rates over `dt` into the target's local pose.
    ///
    /// # Panics
    ///
    /// Panics if the target node has been destroyed.
    pub fn update(&self, dt: Duration, store: &mut TransformStore) {
        let secs = dt.as_secs_f64();
        let pose = store.pose(self.target);
        store.set_pose(
            self.target,
            Pose::new(
                pose.position + self.position * secs,
                pose.rotation + self.rotation * secs,
                pose.scale + self.scale * secs,
            ),
        );
    }
}

/// Per-second rates of change applied to a [`Velocity`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Acceleration {
    velocity: Velocity,
    /// Positional velocity change per second.
    pub position: Vec2,
    /// Angular velocity change per second.
    pub rotation: f64,
    /// Scale velocity change per second.
    pub scale: Vec2,
}

impl Acceleration {
    /// Wraps `velocity` with zero acceleration.
    #[must_use]
    pub const fn new(velocity: Velocity) -> Self {
        Self {
            velocity,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ZERO,
        }
    }

    /// The driven velocity.
    #[must_use]
    pub const fn velocity(&self) -> &Velocity {
        &self.velocity
    }

    /// Mutable access to the driven velocity.
    pub fn velocity_mut(&mut self) -> &mut Velocity {
        &mut self.velocity
    }

    /// Accelerates the velocity over `dt`, then applies it to the target.
    ///
    /// # Panics
    ///
    /// Panics if the target node has been destroyed.
    pub fn update(&mut self, dt: Duration, store: &mut TransformStore) {
        let secs = dt.as_secs_f64();
        self.velocity.position += self.position * secs;
        self.velocity.rotation += self.rotation * secs;
        self.velocity.scale += self.scale * secs;
        self.velocity.update(dt, store);
    }
}
