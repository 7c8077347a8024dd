// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D viewport camera.
//!
//! A [`Camera`] owns a small transform hierarchy (see [`CameraRig`]):
//!
//! ```text
//!   root  (position, rotation, 1/zoom)      ← animated by tweens
//!    └── fit (1/fit_scale, centring)        ← recomputed on resize
//! ```
//!
//! The fit node's absolute matrix maps surface pixels to world space and its
//! inverse is the view matrix. Because the fit node hangs under the root,
//! camera motion applies before the viewport correction.
//!
//! Effects like shakes do not write the root. They set a [`PoseOffset`] that
//! the view adds on top of the root pose, so they stack with whatever tweens
//! are moving the camera.
//!
//! # Viewport fitting
//!
//! The camera declares a logical size, which the [`ResizeMode`] maps onto the
//! actual surface:
//!
//! | mode                         | logical size            | fit scale (px per unit)     |
//! |------------------------------|-------------------------|-----------------------------|
//! | [`ResizeMode::Expand`]       | surface size            | 1                           |
//! | [`ResizeMode::FillStretch`]  | configured, or surface  | surface / logical, per axis |
//! | [`ResizeMode::FillUniform`]  | configured, or surface  | min of the two ratios       |
//!
//! In every mode the logical viewport is centred on the surface; with
//! `FillUniform` the leftover strip is letterboxed (see
//! [`Camera::viewport_rect`]).
//!
//! # Updating
//!
//! [`Camera::update`] polls the [`Surface`] once, refits if the size changed,
//! then advances every active [`Tween`] and [`CameraAnimation`], dropping the
//! ones that finish.

mod animation;
mod config;
mod rig;
mod surface;

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub use animation::{CameraAnimation, DEFAULT_SHAKE_INTENSITY};
pub use config::{CameraConfig, ResizeMode};
pub use rig::{CameraRig, PoseOffset};
pub use surface::{FixedSurface, Surface};

use crate::easing::{EaseFn, EasingMode};
use crate::error::Result;
use crate::transform::{NodeId, Pose, TransformStore};
use crate::tween::Tween;

const FULL_PARALLAX: Vec2 = Vec2::new(1.0, 1.0);

/// Handle to an animation started on a [`Camera`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// A 2D camera bound to a rendering surface.
///
/// ```
/// use kurbo::{Point, Size};
/// use vista_core::camera::{Camera, CameraConfig, FixedSurface, ResizeMode};
///
/// let config = CameraConfig::new()
///     .with_resize_mode(ResizeMode::FillUniform)
///     .with_logical_size(800.0, 800.0);
/// let mut camera = Camera::new(FixedSurface::new(400.0, 800.0), config)?;
///
/// // The camera looks at the centre of the surface.
/// assert_eq!(camera.to_screen(Point::ORIGIN), Point::new(200.0, 400.0));
/// // Half a pixel per world unit.
/// assert_eq!(camera.to_screen(Point::new(100.0, 0.0)), Point::new(250.0, 400.0));
///
/// camera.surface_mut().0 = Size::new(800.0, 800.0);
/// camera.update(core::time::Duration::ZERO);
/// assert_eq!(camera.to_screen(Point::new(100.0, 0.0)), Point::new(500.0, 400.0));
/// # Ok::<(), vista_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Camera<S: Surface> {
    surface: S,
    config: CameraConfig,
    /// Last size reported by the surface, usable or not.
    observed: Size,
    /// Size the fit node was computed for.
    surface_size: Size,
    rig: CameraRig,
    tweens: Vec<(AnimationId, Tween)>,
    animations: Vec<(AnimationId, CameraAnimation)>,
    next_id: u64,
    rng: SmallRng,
}

impl<S: Surface> Camera<S> {
    /// Creates a camera at the origin with zoom 1, fitted to the surface's
    /// current size.
    ///
    /// If the surface reports an empty or non-finite size, the camera fits to
    /// the configured logical size (or 1×1) until a usable size is observed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLogicalSize`](crate::Error::InvalidLogicalSize)
    /// if `config` fails [validation](CameraConfig::validate).
    pub fn new(surface: S, config: CameraConfig) -> Result<Self> {
        config.validate()?;
        let observed = surface.size();
        let surface_size = if surface::is_usable(observed) {
            observed
        } else {
            log::warn!(
                "surface reported unusable size {}x{}; fitting to fallback",
                observed.width,
                observed.height
            );
            Size::new(
                config.logical_width.unwrap_or(1.0),
                config.logical_height.unwrap_or(1.0),
            )
        };
        let mut camera = Self {
            surface,
            config,
            observed,
            surface_size,
            rig: CameraRig::new(Pose::IDENTITY),
            tweens: Vec::new(),
            animations: Vec::new(),
            next_id: 0,
            rng: SmallRng::seed_from_u64(config.shake_seed),
        };
        camera.refit();
        Ok(camera)
    }

    // -- Surface and configuration --

    /// The surface this camera renders to.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface. A size change is picked up by the next
    /// [`update`](Self::update).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// The surface size the viewport is currently fitted to.
    #[must_use]
    pub const fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// Current resize policy.
    #[must_use]
    pub const fn resize_mode(&self) -> ResizeMode {
        self.config.resize_mode
    }

    /// Switches resize policy and refits immediately.
    pub fn set_resize_mode(&mut self, mode: ResizeMode) {
        if self.config.resize_mode != mode {
            self.config.resize_mode = mode;
            self.refit();
        }
    }

    /// Sets the logical size and refits immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLogicalSize`](crate::Error::InvalidLogicalSize)
    /// if either dimension is not positive and finite. The camera is left
    /// unchanged.
    pub fn set_logical_size(&mut self, width: f64, height: f64) -> Result<()> {
        let config = self.config.with_logical_size(width, height);
        config.validate()?;
        self.config = config;
        self.refit();
        Ok(())
    }

    /// Effective logical size.
    #[must_use]
    pub fn logical_size(&self) -> Size {
        self.config.logical_size(self.surface_size)
    }

    /// Surface pixels per logical unit, per axis.
    #[must_use]
    pub fn fit_scale(&self) -> Vec2 {
        self.config.fit_scale(self.surface_size)
    }

    /// Minus half the scaled logical size, in surface pixels.
    #[must_use]
    pub fn fit_offset(&self) -> Vec2 {
        self.config.fit_offset(self.surface_size)
    }

    /// The part of the surface covered by the logical viewport, in surface
    /// pixels. Anything outside it is letterbox.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        self.config.viewport_rect(self.surface_size)
    }

    // -- Pose --

    /// The camera's transform nodes.
    #[must_use]
    pub const fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Mutable access to the camera's transform nodes.
    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// The store holding the camera's nodes.
    #[must_use]
    pub fn store(&self) -> &TransformStore {
        self.rig.store()
    }

    /// The root node, for building tweens that move the camera.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.rig.root()
    }

    /// Root pose; its scale is `1 / zoom`.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.rig.pose()
    }

    /// Sets the root pose.
    pub fn set_pose(&mut self, pose: Pose) {
        self.rig.set_pose(pose);
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Point {
        self.rig.position()
    }

    /// Moves the camera.
    pub fn set_position(&mut self, position: Point) {
        self.rig.set_position(position);
    }

    /// Camera rotation in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rig.rotation()
    }

    /// Rotates the camera.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rig.set_rotation(rotation);
    }

    /// Magnification; above 1 zooms in.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.rig.zoom()
    }

    /// Sets the magnification. `zoom` must be non-zero.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.rig.set_zoom(zoom);
    }

    /// Offset the view adds on top of the root pose.
    #[must_use]
    pub const fn offset(&self) -> PoseOffset {
        self.rig.offset()
    }

    /// Replaces the view offset.
    pub fn set_offset(&mut self, offset: PoseOffset) {
        self.rig.set_offset(offset);
    }

    // -- Matrices and conversion --

    /// World to surface pixels.
    #[must_use]
    pub fn view_matrix(&self) -> Affine {
        if self.rig.offset().is_zero() {
            self.store().inverse_absolute(self.rig.fit())
        } else {
            self.rig.screen_to_world(FULL_PARALLAX).inverse()
        }
    }

    /// World to surface pixels, with the camera's translation scaled per axis
    /// by `parallax`. Background layers use factors below 1 to scroll slower
    /// than the foreground.
    #[must_use]
    pub fn view_matrix_with_parallax(&self, parallax: Vec2) -> Affine {
        self.rig.screen_to_world(parallax).inverse()
    }

    /// Converts a world-space point to surface pixels.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        self.view_matrix() * world
    }

    /// Converts a surface pixel position to world space.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        self.rig.screen_to_world(FULL_PARALLAX) * screen
    }

    /// Axis-aligned world-space bounds of what the viewport shows, accounting
    /// for rotation and zoom.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds_with_parallax(FULL_PARALLAX)
    }

    /// [`bounds`](Self::bounds) for a layer drawn with
    /// [`view_matrix_with_parallax`](Self::view_matrix_with_parallax).
    #[must_use]
    pub fn bounds_with_parallax(&self, parallax: Vec2) -> Rect {
        self.rig
            .screen_to_world(parallax)
            .transform_rect_bbox(self.viewport_rect())
    }

    // -- Frame loop --

    /// Advances the camera by `dt`.
    ///
    /// Polls the surface first so that a resize is reflected before any
    /// animation runs this frame. Finished animations are dropped.
    pub fn update(&mut self, dt: Duration) {
        self.poll_surface();

        let store = self.rig.store_mut();
        self.tweens.retain_mut(|(id, tween)| {
            let finished = tween.advance(dt, store);
            if finished {
                log::trace!("tween {id:?} finished");
            }
            !finished
        });

        let rig = &mut self.rig;
        self.animations.retain_mut(|(id, animation)| {
            let finished = animation.update(rig, dt);
            if finished {
                log::trace!("camera animation {id:?} finished");
            }
            !finished
        });
    }

    fn poll_surface(&mut self) {
        let observed = self.surface.size();
        if surface::same_size(observed, self.observed) {
            return;
        }
        self.observed = observed;
        if !surface::is_usable(observed) {
            log::warn!(
                "ignoring unusable surface size {}x{}; keeping fit for {}x{}",
                observed.width,
                observed.height,
                self.surface_size.width,
                self.surface_size.height
            );
            return;
        }
        log::debug!(
            "surface resized from {}x{} to {}x{}",
            self.surface_size.width,
            self.surface_size.height,
            observed.width,
            observed.height
        );
        self.surface_size = observed;
        self.refit();
    }

    /// Recomputes the fit node from the configuration and surface size.
    fn refit(&mut self) {
        let scale = self.fit_scale();
        let half = self.surface_size.to_vec2() / 2.0;
        self.rig.set_fit(Pose::new(
            Point::new(-half.x / scale.x, -half.y / scale.y),
            0.0,
            Vec2::new(1.0 / scale.x, 1.0 / scale.y),
        ));
        log::debug!(
            "refit viewport: mode {:?}, logical {}x{}, scale {}x{}",
            self.config.resize_mode,
            self.logical_size().width,
            self.logical_size().height,
            scale.x,
            scale.y
        );
    }

    // -- Animations --

    fn next_id(&mut self) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Starts a tween. Tweens run against the camera's own store, so they
    /// should target [`root`](Self::root) or nodes the host added to it.
    pub fn play(&mut self, tween: Tween) -> AnimationId {
        let id = self.next_id();
        self.tweens.push((id, tween));
        id
    }

    /// Starts a tween from the current pose to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveDuration`](crate::Error::NonPositiveDuration)
    /// if `duration` is zero.
    pub fn tween_to(
        &mut self,
        duration: Duration,
        to: Pose,
        ease: impl Into<EaseFn>,
    ) -> Result<AnimationId> {
        let tween = Tween::tween2d_from_current(self.store(), duration, self.root(), to, ease)?;
        Ok(self.play(tween))
    }

    /// Starts a prepared step-based animation.
    pub fn play_animation(&mut self, animation: CameraAnimation) -> AnimationId {
        let id = self.next_id();
        self.animations.push((id, animation));
        id
    }

    /// Starts an empty step-based animation and returns it for building.
    pub fn start_animation(&mut self) -> &mut CameraAnimation {
        let animation = CameraAnimation::with_rng(SmallRng::from_rng(&mut self.rng));
        let id = self.next_id();
        let index = self.animations.len();
        self.animations.push((id, animation));
        &mut self.animations[index].1
    }

    /// Stops an animation, leaving the camera wherever it last put it.
    /// Returns whether the animation was still running.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        if let Some(i) = self.tweens.iter().position(|(t, _)| *t == id) {
            self.tweens.remove(i);
            true
        } else if let Some(i) = self.animations.iter().position(|(a, _)| *a == id) {
            self.animations.remove(i);
            true
        } else {
            false
        }
    }

    /// Stops every animation.
    pub fn cancel_all(&mut self) {
        self.tweens.clear();
        self.animations.clear();
    }

    /// Whether any animation is running.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        !self.tweens.is_empty() || !self.animations.is_empty()
    }

    /// Starts an animation that only waits.
    pub fn wait(&mut self, duration: Duration) -> &mut CameraAnimation {
        self.start_animation().then_wait(duration)
    }

    /// Starts a shake of `intensity` world units.
    pub fn shake(&mut self, duration: Duration, intensity: f64) -> &mut CameraAnimation {
        self.start_animation().then_shake(duration, intensity)
    }

    /// Starts a move from the current position to `to`.
    pub fn move_to(
        &mut self,
        duration: Duration,
        to: Point,
        mode: EasingMode,
    ) -> &mut CameraAnimation {
        let from = self.position();
        self.move_between(duration, from, to, mode)
    }

    /// Starts a move from `from` to `to`.
    pub fn move_between(
        &mut self,
        duration: Duration,
        from: Point,
        to: Point,
        mode: EasingMode,
    ) -> &mut CameraAnimation {
        self.start_animation().then_move(duration, from, to, mode)
    }

    /// Starts a zoom from the current zoom to `to`.
    pub fn zoom_to(
        &mut self,
        duration: Duration,
        to: f64,
        mode: EasingMode,
    ) -> &mut CameraAnimation {
        let from = self.zoom();
        self.zoom_between(duration, from, to, mode)
    }

    /// Starts a zoom from `from` to `to`.
    pub fn zoom_between(
        &mut self,
        duration: Duration,
        from: f64,
        to: f64,
        mode: EasingMode,
    ) -> &mut CameraAnimation {
        self.start_animation().then_zoom(duration, from, to, mode)
    }

    /// Starts a rotation from the current rotation to `to` radians.
    pub fn rotate_to(
        &mut self,
        duration: Duration,
        to: f64,
        mode: EasingMode,
    ) -> &mut CameraAnimation {
        let from = self.rotation();
        self.rotate_between(duration, from, to, mode)
    }

    /// Starts a rotation from `from` to `to` radians.
    pub fn rotate_between(
        &mut self,
        duration: Duration,
        from: f64,
        to: f64,
        mode: EasingMode,
    ) -> &mut CameraAnimation {
        self.start_animation().then_rotate(duration, from, to, mode)
    }

    /// Starts a simultaneous move and zoom.
    pub fn move_and_zoom(
        &mut self,
        duration: Duration,
        from: Point,
        to: Point,
        from_zoom: f64,
        to_zoom: f64,
        mode: EasingMode,
    ) -> &mut CameraAnimation {
        self.start_animation()
            .then_move_and_zoom(duration, from, to, from_zoom, to_zoom, mode)
    }
}

/// Clones the configuration and the current pose into a fresh camera.
///
/// Running animations are not copied, and neither are nodes the host added to
/// the source camera's store. The view offset belongs to those animations and
/// starts at zero.
impl<S: Surface + Clone> Clone for Camera<S> {
    fn clone(&self) -> Self {
        let mut rig = CameraRig::new(self.rig.pose());
        rig.set_fit(self.store().pose(self.rig.fit()));
        Self {
            surface: self.surface.clone(),
            config: self.config,
            observed: self.observed,
            surface_size: self.surface_size,
            rig,
            tweens: Vec::new(),
            animations: Vec::new(),
            next_id: 0,
            rng: SmallRng::seed_from_u64(self.config.shake_seed),
        }
    }
}
