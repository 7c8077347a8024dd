// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera configuration and viewport-fit policy.
//!
//! Everything here is a pure function of the configuration and the surface
//! size, so the fit math can be checked without building a camera.

use kurbo::{Rect, Size, Vec2};

use crate::error::{Error, Result};

/// How a camera's logical size maps onto the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    /// The logical size always equals the surface size. No scaling, no
    /// letterboxing.
    #[default]
    Expand,
    /// Scale each axis independently so the logical size fills the surface
    /// exactly. Aspect ratio is not preserved.
    FillStretch,
    /// Scale both axes by the smaller of the two per-axis ratios. Aspect
    /// ratio is preserved; the unused strip of the surface is letterboxed.
    FillUniform,
}

impl ResizeMode {
    /// Cycles `Expand → FillStretch → FillUniform → Expand`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Expand => Self::FillStretch,
            Self::FillStretch => Self::FillUniform,
            Self::FillUniform => Self::Expand,
        }
    }
}

/// Configuration for a [`Camera`](super::Camera).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Resize policy.
    pub resize_mode: ResizeMode,
    /// Logical width; falls back to the surface width when `None`. Ignored
    /// in [`ResizeMode::Expand`].
    pub logical_width: Option<f64>,
    /// Logical height; falls back to the surface height when `None`. Ignored
    /// in [`ResizeMode::Expand`].
    pub logical_height: Option<f64>,
    /// Seed for the random jitter of camera shakes.
    pub shake_seed: u64,
}

impl CameraConfig {
    /// Seed used by [`CameraConfig::default`].
    pub const DEFAULT_SHAKE_SEED: u64 = 0x5eed_cafe;

    /// [`ResizeMode::Expand`] with no logical size overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resize_mode: ResizeMode::Expand,
            logical_width: None,
            logical_height: None,
            shake_seed: Self::DEFAULT_SHAKE_SEED,
        }
    }

    /// Returns a copy with a different resize mode.
    #[must_use]
    pub const fn with_resize_mode(self, resize_mode: ResizeMode) -> Self {
        Self {
            resize_mode,
            ..self
        }
    }

    /// Returns a copy with both logical dimensions set.
    #[must_use]
    pub const fn with_logical_size(self, width: f64, height: f64) -> Self {
        Self {
            logical_width: Some(width),
            logical_height: Some(height),
            ..self
        }
    }

    /// Returns a copy with a different shake seed.
    #[must_use]
    pub const fn with_shake_seed(self, shake_seed: u64) -> Self {
        Self { shake_seed, ..self }
    }

    /// Checks that any logical dimension set is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLogicalSize`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let ok = |v: Option<f64>| v.is_none_or(|v| v.is_finite() && v > 0.0);
        if ok(self.logical_width) && ok(self.logical_height) {
            Ok(())
        } else {
            Err(Error::InvalidLogicalSize {
                width: self.logical_width.unwrap_or_default(),
                height: self.logical_height.unwrap_or_default(),
            })
        }
    }

    /// The effective logical size on a surface of size `surface`.
    #[must_use]
    pub fn logical_size(&self, surface: Size) -> Size {
        match self.resize_mode {
            ResizeMode::Expand => surface,
            ResizeMode::FillStretch | ResizeMode::FillUniform => Size::new(
                self.logical_width.unwrap_or(surface.width),
                self.logical_height.unwrap_or(surface.height),
            ),
        }
    }

    /// Surface pixels per logical unit, per axis.
    #[must_use]
    pub fn fit_scale(&self, surface: Size) -> Vec2 {
        let logical = self.logical_size(surface);
        let sx = surface.width / logical.width;
        let sy = surface.height / logical.height;
        match self.resize_mode {
            ResizeMode::Expand => Vec2::new(1.0, 1.0),
            ResizeMode::FillStretch => Vec2::new(sx, sy),
            ResizeMode::FillUniform => {
                let s = sx.min(sy);
                Vec2::new(s, s)
            }
        }
    }

    /// Minus half the scaled logical size: where the viewport's top-left
    /// corner sits relative to its centre, in surface pixels.
    #[must_use]
    pub fn fit_offset(&self, surface: Size) -> Vec2 {
        let logical = self.logical_size(surface);
        let scale = self.fit_scale(surface);
        Vec2::new(
            -logical.width * scale.x / 2.0,
            -logical.height * scale.y / 2.0,
        )
    }

    /// The rectangle of the surface covered by the logical viewport, centred,
    /// in surface pixels.
    #[must_use]
    pub fn viewport_rect(&self, surface: Size) -> Rect {
        let half = -self.fit_offset(surface);
        let center = surface.to_rect().center();
        Rect::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new()
    }
}
