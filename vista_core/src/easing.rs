// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing functions and interpolation.
//!
//! An easing function reshapes normalized progress `t ∈ [0, 1]` so that
//! interpolation can speed up or slow down over time. Every function maps 0
//! to 0 and 1 to 1.
//!
//! Two families are offered:
//!
//! - [`EasingMode`] for step-based camera animations
//!   ([`CameraAnimation`](crate::camera::CameraAnimation)).
//! - [`Ease`] for pose tweens ([`Tween2d`](crate::tween::Tween2d)), including
//!   elastic curves.
//!
//! Both resolve to a plain [`EaseFn`], which is all that call sites store.

use core::f64::consts::FRAC_PI_2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::transform::Pose;

/// An easing curve: normalized progress in, eased progress out.
pub type EaseFn = fn(f64) -> f64;

/// Constant speed.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic, slow start.
#[must_use]
pub fn quad_in(t: f64) -> f64 {
    t * t
}

/// Quadratic, slow end.
#[must_use]
pub fn quad_out(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Quadratic, slow start and end; `2t²` up to the midpoint, mirrored after.
#[must_use]
pub fn quad_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Damped oscillation that grows into the end value.
#[must_use]
pub fn elastic_in(t: f64) -> f64 {
    (13.0 * FRAC_PI_2 * t).sin() * 2.0_f64.powf(10.0 * (t - 1.0))
}

/// Overshoots the end value and settles with a damped oscillation.
#[must_use]
pub fn elastic_out(t: f64) -> f64 {
    (-13.0 * FRAC_PI_2 * (t + 1.0)).sin() * 2.0_f64.powf(-10.0 * t) + 1.0
}

/// [`elastic_in`] for the first half, [`elastic_out`] for the second.
#[must_use]
pub fn elastic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        0.5 * elastic_in(2.0 * t)
    } else {
        0.5 * (elastic_out(2.0 * t - 1.0) + 1.0)
    }
}

/// Easing curves used by step-based camera animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EasingMode {
    /// Constant speed.
    Linear,
    /// Slow start, fast end.
    EaseIn,
    /// Fast start, slow end.
    EaseOut,
    /// Slow start and end, fast middle.
    #[default]
    EaseInOut,
}

impl EasingMode {
    /// Returns the curve for this mode.
    #[must_use]
    pub const fn function(self) -> EaseFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => quad_in,
            Self::EaseOut => quad_out,
            Self::EaseInOut => quad_in_out,
        }
    }

    /// Eases `t`, clamped to `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        ease(self, t)
    }
}

/// Easing curves used by pose tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Quadratic, slow start.
    In,
    /// Quadratic, slow end.
    Out,
    /// Quadratic, slow start and end.
    #[default]
    InOut,
    /// Elastic wind-up before the end.
    ElasticIn,
    /// Elastic overshoot after the start.
    ElasticOut,
    /// Elastic at both ends.
    ElasticInOut,
}

impl Ease {
    /// Returns the curve for this variant.
    #[must_use]
    pub const fn function(self) -> EaseFn {
        match self {
            Self::In => quad_in,
            Self::Out => quad_out,
            Self::InOut => quad_in_out,
            Self::ElasticIn => elastic_in,
            Self::ElasticOut => elastic_out,
            Self::ElasticInOut => elastic_in_out,
        }
    }

    /// Eases `t`, clamped to `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        ease(self, t)
    }
}

impl From<EasingMode> for EaseFn {
    fn from(mode: EasingMode) -> Self {
        mode.function()
    }
}

impl From<Ease> for EaseFn {
    fn from(ease: Ease) -> Self {
        ease.function()
    }
}

/// Applies an easing curve to `t`, clamped to `[0, 1]`.
///
/// NaN progress is treated as 0.
#[must_use]
pub fn ease(curve: impl Into<EaseFn>, t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    (curve.into())(t)
}

/// Interpolates from `start` to `end` along an easing curve:
/// `start + (end - start) * ease(curve, t)`.
#[must_use]
pub fn interpolate<T: Tweenable>(curve: impl Into<EaseFn>, t: f64, start: T, end: T) -> T {
    T::lerp(start, end, ease(curve, t))
}

/// Types that can be interpolated (tweened).
pub trait Tweenable: Copy {
    /// Linear interpolation between two values.
    ///
    /// `t = 0` returns `a` and `t = 1` returns `b`. Values outside that range
    /// extrapolate, which elastic curves rely on.
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Tweenable for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Tweenable for f32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "interpolation factor only needs f32 precision here"
    )]
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t as Self
    }
}

impl Tweenable for Point {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a.lerp(b, t)
    }
}

impl Tweenable for Vec2 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a.lerp(b, t)
    }
}

impl Tweenable for Pose {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a.lerp(&b, t)
    }
}

/// A straight (non-premultiplied) RGBA colour with `f32` channels in
/// `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Creates a colour from its four channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Tweenable for Rgba {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            r: <f32 as Tweenable>::lerp(a.r, b.r, t),
            g: <f32 as Tweenable>::lerp(a.g, b.g, t),
            b: <f32 as Tweenable>::lerp(a.b, b.b, t),
            a: <f32 as Tweenable>::lerp(a.a, b.a, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [EasingMode; 4] = [
        EasingMode::Linear,
        EasingMode::EaseIn,
        EasingMode::EaseOut,
        EasingMode::EaseInOut,
    ];

    const ALL_EASES: [Ease; 6] = [
        Ease::In,
        Ease::Out,
        Ease::InOut,
        Ease::ElasticIn,
        Ease::ElasticOut,
        Ease::ElasticInOut,
    ];

    #[test]
    fn boundaries_are_fixed_points() {
        for mode in ALL_MODES {
            assert_eq!(ease(mode, 0.0), 0.0, "{mode:?}");
            assert_eq!(ease(mode, 1.0), 1.0, "{mode:?}");
        }
        for e in ALL_EASES {
            assert!(ease(e, 0.0).abs() < 1e-9, "{e:?} at 0");
            assert!((ease(e, 1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for mode in ALL_MODES {
            assert_eq!(mode.apply(-3.0), 0.0, "{mode:?}");
            assert_eq!(mode.apply(7.5), 1.0, "{mode:?}");
            assert_eq!(mode.apply(f64::NAN), 0.0, "{mode:?}");
        }
    }

    #[test]
    fn quadratic_shapes() {
        assert_eq!(quad_in(0.5), 0.25);
        assert_eq!(quad_out(0.5), 0.75);
        assert_eq!(quad_in_out(0.25), 0.125);
        assert_eq!(quad_in_out(0.5), 0.5);
        assert_eq!(quad_in_out(0.75), 0.875);
        // Ease-in lags and ease-out leads linear progress.
        assert!(EasingMode::EaseIn.apply(0.3) < 0.3);
        assert!(EasingMode::EaseOut.apply(0.3) > 0.3);
    }

    #[test]
    fn in_out_is_symmetric() {
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let lhs = quad_in_out(t);
            let rhs = 1.0 - quad_in_out(1.0 - t);
            assert!((lhs - rhs).abs() < 1e-12, "t = {t}");
        }
    }

    #[test]
    fn elastic_out_overshoots() {
        let peak = (1..100)
            .map(|i| elastic_out(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    fn families_share_the_capability() {
        let a: EaseFn = EasingMode::EaseInOut.into();
        let b: EaseFn = Ease::InOut.into();
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert_eq!(a(t), b(t), "t = {t}");
        }
    }

    #[test]
    fn interpolate_values() {
        assert_eq!(interpolate(EasingMode::Linear, 0.25, 0.0, 100.0), 25.0);
        assert_eq!(interpolate(EasingMode::EaseIn, 0.5, 10.0, 20.0), 12.5);

        let p = interpolate(
            EasingMode::Linear,
            0.5,
            Point::new(0.0, 10.0),
            Point::new(10.0, 30.0),
        );
        assert_eq!(p, Point::new(5.0, 20.0));

        let c = interpolate(
            EasingMode::Linear,
            0.5,
            Rgba::new(0.0, 0.0, 0.0, 1.0),
            Rgba::new(1.0, 0.5, 0.25, 0.0),
        );
        assert_eq!(c, Rgba::new(0.5, 0.25, 0.125, 0.5));
    }
}
