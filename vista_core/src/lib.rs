// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D viewport camera with a lazily cached transform hierarchy and a
//! composable tweening engine.
//!
//! `vista_core` is `no_std` compatible (with `alloc`). Transform nodes live in
//! an arena addressed by generational [`NodeId`](transform::NodeId) handles;
//! parents and children refer to each other only by index, so re-parenting
//! and destruction never fight the borrow checker.
//!
//! # Architecture
//!
//! The host drives everything from its frame loop:
//!
//! ```text
//!   host frame (dt, surface size)
//!       │
//!       ▼
//!   Camera::update() ──► refit viewport node (if surface changed)
//!       │
//!       ▼
//!   Tween::advance() ──► TransformStore setters ──► dirty flags
//!                                                      │
//!                 ┌────────────────────────────────────┘
//!                 ▼
//!   renderer reads Camera::view_matrix() / to_screen() / bounds()
//!   (matrices recomputed lazily on first read)
//! ```
//!
//! **[`transform`]** — Arena of transform nodes. Local position, rotation and
//! scale are set by the caller; local/absolute matrices and their inverse are
//! recomputed on first read after invalidation and memoized until the next
//! mutation.
//!
//! **[`easing`]** — Pure easing functions in two families, both exposed as a
//! plain [`EaseFn`](easing::EaseFn), plus the [`Tweenable`](easing::Tweenable)
//! interpolation trait.
//!
//! **[`tween`]** — Closed set of time-driven state changers: delay, pose
//! tween, sequence, parallel and repeat.
//!
//! **[`motion`]** — Velocity and acceleration integrators for free-running
//! motion of a node.
//!
//! **[`camera`]** — Camera composed of a root node and a viewport-fit child
//! node, with resize policies, coordinate conversion, an active tween set, and
//! the step-based [`CameraAnimation`](camera::CameraAnimation) builder.
//!
//! **[`error`]** — Configuration and invariant errors.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod camera;
pub mod easing;
pub mod error;
pub mod motion;
pub mod transform;
pub mod tween;

pub use error::{Error, Result};
