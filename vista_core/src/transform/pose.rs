// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local transform components.

use kurbo::{Affine, Point, Vec2};

/// Position, rotation, and scale of a node relative to its parent.
///
/// Also used as a snapshot: pose tweens interpolate between two `Pose`s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Translation, in parent space.
    pub position: Point,
    /// Rotation in radians.
    pub rotation: f64,
    /// Per-axis scale factor.
    pub scale: Vec2,
}

impl Pose {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Point::ORIGIN,
        rotation: 0.0,
        scale: Vec2::new(1.0, 1.0),
    };

    /// Creates a pose from its three components.
    #[inline]
    #[must_use]
    pub const fn new(position: Point, rotation: f64, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates an unrotated, unscaled pose at `position`.
    #[inline]
    #[must_use]
    pub const fn from_position(position: Point) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Returns a copy with a different position.
    #[inline]
    #[must_use]
    pub const fn with_position(self, position: Point) -> Self {
        Self { position, ..self }
    }

    /// Returns a copy with a different rotation.
    #[inline]
    #[must_use]
    pub const fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    /// Returns a copy with a different scale.
    #[inline]
    #[must_use]
    pub const fn with_scale(self, scale: Vec2) -> Self {
        Self { scale, ..self }
    }

    /// Composes the local matrix: scale first, then rotation, then
    /// translation.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Componentwise linear interpolation; `t = 0` yields `self`, `t = 1`
    /// yields `to`.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(to.position, t),
            rotation: self.rotation + (to.rotation - self.rotation) * t,
            scale: self.scale.lerp(to.scale, t),
        }
    }

    /// Is every component [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Pose {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < EPS
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Pose::default(), Pose::IDENTITY);
        assert_eq!(Pose::IDENTITY.to_affine(), Affine::IDENTITY);
    }

    #[test]
    fn scale_applies_before_translation() {
        let pose = Pose::new(Point::new(10.0, 20.0), 0.0, Vec2::new(2.0, 3.0));
        let p = pose.to_affine() * Point::new(1.0, 1.0);
        // Scaled to (2, 3), then moved by (10, 20).
        assert!(close(p, Point::new(12.0, 23.0)), "got {p:?}");
    }

    #[test]
    fn rotation_applies_before_translation() {
        let pose = Pose::new(
            Point::new(5.0, 0.0),
            core::f64::consts::FRAC_PI_2,
            Vec2::new(1.0, 1.0),
        );
        let p = pose.to_affine() * Point::new(1.0, 0.0);
        // +90deg takes (1, 0) to (0, 1).
        assert!(close(p, Point::new(5.0, 1.0)), "got {p:?}");
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Pose::IDENTITY;
        let b = Pose::new(Point::new(100.0, -50.0), 2.0, Vec2::new(3.0, 5.0));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);

        let mid = a.lerp(&b, 0.5);
        assert!(close(mid.position, Point::new(50.0, -25.0)), "{mid:?}");
        assert!((mid.rotation - 1.0).abs() < EPS, "{mid:?}");
        assert!((mid.scale - Vec2::new(2.0, 3.0)).hypot() < EPS, "{mid:?}");
    }

    #[test]
    fn builders_replace_one_component() {
        let p = Pose::from_position(Point::new(1.0, 2.0))
            .with_rotation(0.5)
            .with_scale(Vec2::new(2.0, 2.0));
        assert_eq!(p.position, Point::new(1.0, 2.0));
        assert_eq!(p.rotation, 0.5);
        assert_eq!(p.scale, Vec2::new(2.0, 2.0));
        assert!(p.is_finite());
        assert!(!p.with_rotation(f64::NAN).is_finite());
    }
}
