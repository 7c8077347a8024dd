// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Step-based camera animations.
//!
//! A [`CameraAnimation`] is a list of groups played one after another; the
//! steps inside a group play side by side. Each step drives one camera
//! property from an eased progress `amount ∈ [0, 1]`:
//!
//! ```text
//!   group 0          group 1                 group 2
//!   ┌──────────┐     ┌────────────────────┐  ┌───────┐
//!   │ move     │ ──► │ move               │─►│ shake │
//!   └──────────┘     │ zoom (shorter)     │  └───────┘
//!                    └────────────────────┘
//! ```
//!
//! Unlike [`Tween`](crate::tween::Tween)s, steps may have zero duration; such a
//! step applies its end state on its first update. Shakes write the view
//! offset instead of the root pose.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::CameraConfig;
use super::rig::{CameraRig, PoseOffset};
use crate::easing::EasingMode;

/// Shake intensity used by [`Camera::shake`](super::Camera::shake) callers
/// that have no better idea, in world units.
pub const DEFAULT_SHAKE_INTENSITY: f64 = 60.0;

/// Angular jitter is the positional jitter divided by this.
const SHAKE_ROTATION_DIVISOR: f64 = 1500.0;

struct RelayFn(Box<dyn FnMut(&mut CameraRig, f64)>);

impl fmt::Debug for RelayFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RelayFn(..)")
    }
}

#[derive(Debug)]
enum StepKind {
    Wait,
    Move { from: Point, to: Point },
    Zoom { from: f64, to: f64 },
    Rotate { from: f64, to: f64 },
    Shake { intensity: f64 },
    Relay(RelayFn),
}

#[derive(Debug)]
struct Step {
    kind: StepKind,
    duration: Duration,
    elapsed: Duration,
    mode: EasingMode,
}

impl Step {
    const fn new(kind: StepKind, duration: Duration, mode: EasingMode) -> Self {
        Self {
            kind,
            duration,
            elapsed: Duration::ZERO,
            mode,
        }
    }

    /// Applies the step at its new progress; returns whether it is complete.
    fn update(&mut self, rig: &mut CameraRig, dt: Duration, rng: &mut SmallRng) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        let amount = self.mode.apply(t);

        match &mut self.kind {
            StepKind::Wait => {}
            StepKind::Move { from, to } => rig.set_position(from.lerp(*to, amount)),
            StepKind::Zoom { from, to } => rig.set_zoom(*from + (*to - *from) * amount),
            StepKind::Rotate { from, to } => rig.set_rotation(*from + (*to - *from) * amount),
            StepKind::Shake { intensity } => {
                // Falloff reaches zero on the last update, clearing the offset.
                let falloff = *intensity * (1.0 - amount);
                let jitter = Vec2::new(
                    rng.random_range(-1.0..=1.0),
                    rng.random_range(-1.0..=1.0),
                );
                let spin: f64 = rng.random_range(-1.0..=1.0);
                rig.set_offset(PoseOffset {
                    position: jitter * falloff,
                    rotation: spin * falloff / SHAKE_ROTATION_DIVISOR,
                    ..rig.offset()
                });
            }
            StepKind::Relay(relay) => (relay.0)(rig, amount),
        }

        amount >= 1.0
    }
}

/// A sequence of parallel step groups driving a camera's root pose.
///
/// Built with the `then_*` methods, usually starting from one of the
/// [`Camera`](super::Camera) shortcuts:
///
/// ```
/// use core::time::Duration;
/// use kurbo::Point;
/// use vista_core::camera::{Camera, CameraConfig, FixedSurface};
/// use vista_core::easing::EasingMode;
///
/// let mut camera = Camera::new(FixedSurface::new(800.0, 600.0), CameraConfig::new())?;
/// camera
///     .move_to(Duration::from_secs(1), Point::new(100.0, 0.0), EasingMode::EaseInOut)
///     .then_zoom(Duration::from_millis(500), 1.0, 2.0, EasingMode::EaseOut)
///     .then_shake(Duration::from_millis(300), 20.0);
///
/// for _ in 0..120 {
///     camera.update(Duration::from_millis(16));
/// }
/// assert!(!camera.is_animated());
/// assert_eq!(camera.position(), Point::new(100.0, 0.0));
/// assert_eq!(camera.zoom(), 2.0);
/// # Ok::<(), vista_core::Error>(())
/// ```
#[derive(Debug)]
pub struct CameraAnimation {
    groups: Vec<Vec<Step>>,
    current: usize,
    rng: SmallRng,
}

impl CameraAnimation {
    /// Creates an empty animation with the default shake seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(CameraConfig::DEFAULT_SHAKE_SEED)
    }

    /// Creates an empty animation whose shakes are seeded with `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    pub(crate) fn with_rng(rng: SmallRng) -> Self {
        Self {
            groups: Vec::new(),
            current: 0,
            rng,
        }
    }

    fn push(&mut self, group: Vec<Step>) -> &mut Self {
        self.groups.push(group);
        self
    }

    /// Appends a custom step that receives the camera rig and the eased
    /// amount on every update.
    pub fn then(
        &mut self,
        duration: Duration,
        relay: impl FnMut(&mut CameraRig, f64) + 'static,
        mode: EasingMode,
    ) -> &mut Self {
        self.push(vec![Step::new(
            StepKind::Relay(RelayFn(Box::new(relay))),
            duration,
            mode,
        )])
    }

    /// Appends a pause.
    pub fn then_wait(&mut self, duration: Duration) -> &mut Self {
        self.push(vec![Step::new(
            StepKind::Wait,
            duration,
            EasingMode::Linear,
        )])
    }

    /// Appends a move of the camera position from `from` to `to`.
    pub fn then_move(
        &mut self,
        duration: Duration,
        from: Point,
        to: Point,
        mode: EasingMode,
    ) -> &mut Self {
        self.push(vec![Step::new(
            StepKind::Move { from, to },
            duration,
            mode,
        )])
    }

    /// Appends a zoom from `from` to `to`.
    pub fn then_zoom(
        &mut self,
        duration: Duration,
        from: f64,
        to: f64,
        mode: EasingMode,
    ) -> &mut Self {
        self.push(vec![Step::new(
            StepKind::Zoom { from, to },
            duration,
            mode,
        )])
    }

    /// Appends a rotation from `from` to `to` radians.
    pub fn then_rotate(
        &mut self,
        duration: Duration,
        from: f64,
        to: f64,
        mode: EasingMode,
    ) -> &mut Self {
        self.push(vec![Step::new(
            StepKind::Rotate { from, to },
            duration,
            mode,
        )])
    }

    /// Appends a shake that decays linearly from `intensity` world units to
    /// nothing.
    ///
    /// The shake jitters the rig's [`PoseOffset`] rather than its root, so it
    /// stacks with other camera motion, and leaves the offset at zero when it
    /// completes.
    pub fn then_shake(&mut self, duration: Duration, intensity: f64) -> &mut Self {
        self.push(vec![Step::new(
            StepKind::Shake { intensity },
            duration,
            EasingMode::Linear,
        )])
    }

    /// Appends a move and a zoom running side by side.
    pub fn then_move_and_zoom(
        &mut self,
        duration: Duration,
        from: Point,
        to: Point,
        from_zoom: f64,
        to_zoom: f64,
        mode: EasingMode,
    ) -> &mut Self {
        self.push(vec![
            Step::new(StepKind::Move { from, to }, duration, mode),
            Step::new(
                StepKind::Zoom {
                    from: from_zoom,
                    to: to_zoom,
                },
                duration,
                mode,
            ),
        ])
    }

    /// Sum over groups of the longest step in each.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.groups
            .iter()
            .map(|group| group_span(group, |s| s.duration))
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    /// Duration of the completed groups plus the furthest-along step of the
    /// current one.
    #[must_use]
    pub fn time(&self) -> Duration {
        let done = self.groups[..self.current.min(self.groups.len())]
            .iter()
            .map(|group| group_span(group, |s| s.duration))
            .fold(Duration::ZERO, Duration::saturating_add);
        match self.groups.get(self.current) {
            Some(group) => done.saturating_add(group_span(group, |s| s.elapsed)),
            None => done,
        }
    }

    /// Number of step groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no steps have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether every group has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.groups.len()
    }

    /// Updates every step of the current group; moves on to the next group
    /// once all of them are complete. Returns whether the whole animation is
    /// complete.
    pub fn update(&mut self, rig: &mut CameraRig, dt: Duration) -> bool {
        let Some(group) = self.groups.get_mut(self.current) else {
            return true;
        };
        let mut complete = true;
        for step in group {
            complete &= step.update(rig, dt, &mut self.rng);
        }
        if complete {
            self.current += 1;
        }
        self.is_finished()
    }
}

impl Default for CameraAnimation {
    fn default() -> Self {
        Self::new()
    }
}

fn group_span(group: &[Step], f: impl Fn(&Step) -> Duration) -> Duration {
    group.iter().map(f).max().unwrap_or_default()
}
