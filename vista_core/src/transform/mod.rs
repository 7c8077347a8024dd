// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform hierarchy.
//!
//! A *node* is a point in a parent/child spatial graph. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//! - Topology: at most one parent plus an ordered list of children. Both
//!   directions are plain slot indices; no node owns another.
//! - **Local properties** set by the caller: a [`Pose`] of position,
//!   rotation, and scale.
//! - **Cached properties** produced on demand: the local matrix, the absolute
//!   matrix (ancestors' absolute matrix composed with the local one) and its
//!   inverse, plus absolute rotation and scale.
//!
//! # Caching
//!
//! Nothing is computed eagerly. Mutations only flip [`Dirty`] flags, and each
//! cached value is recomputed by the first getter that needs it after an
//! invalidation. Repeated reads between mutations are free; see
//! [`CacheStats`] for the counters that make this observable.
//!
//! Re-parenting rejects cycles with
//! [`Error::ParentCycle`](crate::Error::ParentCycle), so the parent chain is
//! always finite.

mod dirty;
mod id;
mod pose;
mod store;
mod traverse;

pub use dirty::Dirty;
pub use id::NodeId;
pub use pose::Pose;
pub use store::{CacheStats, TransformStore};
pub use traverse::NodeIter;
