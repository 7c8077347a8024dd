// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The camera's transform nodes.

use kurbo::{Affine, Point, Vec2};

use crate::transform::{NodeId, Pose, TransformStore};

/// Additive adjustments the camera's view layers over the root pose.
///
/// Offsets let short-lived effects such as shakes disturb the view without
/// touching the root, so tweens and step animations driving the root keep
/// their state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseOffset {
    /// Added to the camera position, in world units.
    pub position: Vec2,
    /// Added to the camera rotation, in radians.
    pub rotation: f64,
    /// Added to both axes of the root scale (`1 / zoom`).
    pub scale: f64,
}

impl PoseOffset {
    /// No adjustment.
    pub const ZERO: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: 0.0,
    };

    /// Whether this offset leaves a pose unchanged.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// `pose` with this offset added component-wise.
    #[must_use]
    pub fn apply(&self, pose: Pose) -> Pose {
        Pose::new(
            pose.position + self.position,
            pose.rotation + self.rotation,
            pose.scale + Vec2::new(self.scale, self.scale),
        )
    }
}

/// A camera's own transform hierarchy: a root node carrying position,
/// rotation and zoom, and a viewport-fit child carrying the resize
/// correction.
///
/// Zoom is the reciprocal of the root's horizontal scale, so a zoom above 1
/// magnifies.
#[derive(Debug)]
pub struct CameraRig {
    store: TransformStore,
    root: NodeId,
    fit: NodeId,
    offset: PoseOffset,
}

impl CameraRig {
    pub(crate) fn new(pose: Pose) -> Self {
        let mut store = TransformStore::new();
        let root = store.create_node_with(pose);
        let fit = store.create_child(root, Pose::IDENTITY);
        Self {
            store,
            root,
            fit,
            offset: PoseOffset::ZERO,
        }
    }

    /// Root pose with the given position, rotation and zoom.
    ///
    /// `zoom` must be non-zero.
    #[must_use]
    pub fn pose_for(position: Point, rotation: f64, zoom: f64) -> Pose {
        Pose::new(position, rotation, Vec2::new(1.0 / zoom, 1.0 / zoom))
    }

    /// The transform store holding the camera's nodes.
    ///
    /// Tweens and motion integrators aimed at [`root`](Self::root) run
    /// against this store.
    #[must_use]
    pub fn store(&self) -> &TransformStore {
        &self.store
    }

    /// Mutable access to the transform store.
    ///
    /// Hosts may hang their own nodes under [`root`](Self::root) to have them
    /// follow the camera. The fit node must not be touched.
    pub fn store_mut(&mut self) -> &mut TransformStore {
        &mut self.store
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The viewport-fit node.
    #[must_use]
    pub const fn fit(&self) -> NodeId {
        self.fit
    }

    /// Root pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.store.pose(self.root)
    }

    /// Sets the root pose.
    pub fn set_pose(&mut self, pose: Pose) {
        self.store.set_pose(self.root, pose);
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Point {
        self.store.position(self.root)
    }

    /// Moves the camera.
    pub fn set_position(&mut self, position: Point) {
        self.store.set_position(self.root, position);
    }

    /// Camera rotation in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.store.rotation(self.root)
    }

    /// Rotates the camera to `rotation` radians.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.store.set_rotation(self.root, rotation);
    }

    /// Magnification; `1 / scale.x` of the root.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        1.0 / self.store.scale(self.root).x
    }

    /// Sets the magnification. `zoom` must be non-zero.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.store
            .set_scale(self.root, Vec2::new(1.0 / zoom, 1.0 / zoom));
    }

    /// Offset layered over the root pose by the view.
    #[must_use]
    pub const fn offset(&self) -> PoseOffset {
        self.offset
    }

    /// Replaces the view offset.
    pub fn set_offset(&mut self, offset: PoseOffset) {
        self.offset = offset;
    }

    /// The pose the view is built from: the root pose plus the offset.
    #[must_use]
    pub fn view_pose(&self) -> Pose {
        self.offset.apply(self.pose())
    }

    /// Maps surface pixels to world space, with the camera translation
    /// scaled per axis by `parallax`.
    ///
    /// Without an offset and at full parallax this is the fit node's cached
    /// absolute matrix.
    #[must_use]
    pub fn screen_to_world(&self, parallax: Vec2) -> Affine {
        if self.offset.is_zero() && parallax == Vec2::new(1.0, 1.0) {
            return self.store.absolute(self.fit);
        }
        let view = self.view_pose();
        let shifted = view.with_position(Point::new(
            view.position.x * parallax.x,
            view.position.y * parallax.y,
        ));
        shifted.to_affine() * self.store.local(self.fit)
    }

    pub(crate) fn set_fit(&mut self, pose: Pose) {
        self.store.set_pose(self.fit, pose);
    }
}
