// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering surface size providers.

use kurbo::Size;

/// Reports the current pixel size of the surface a camera renders to.
///
/// Polled once per [`Camera::update`](super::Camera::update). Implemented for
/// [`FixedSurface`] and for any `Fn() -> Size` closure, which is the usual way
/// to bridge a window or canvas.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> Size;
}

/// A surface whose size only changes when the host writes to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSurface(pub Size);

impl FixedSurface {
    /// Creates a surface of `width` by `height` pixels.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self(Size::new(width, height))
    }
}

impl Surface for FixedSurface {
    fn size(&self) -> Size {
        self.0
    }
}

impl<F: Fn() -> Size> Surface for F {
    fn size(&self) -> Size {
        self()
    }
}

/// Whether a reported surface size can be fitted to.
pub(crate) fn is_usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Whether two reported sizes are identical, treating NaN as equal to itself
/// so a surface stuck on NaN counts as unchanged.
pub(crate) fn same_size(a: Size, b: Size) -> bool {
    a.width.to_bits() == b.width.to_bits() && a.height.to_bits() == b.height.to_bits()
}
