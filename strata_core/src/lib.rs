// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conditional layer groups for map rendering.
//!
//! `strata_core` shows and hides map layers according to per-layer
//! conditions, typically zoom-level thresholds. It is `no_std` compatible
//! (with `alloc`) and does no rendering itself: it composes with whatever
//! layer container the host map library provides.
//!
//! # Architecture
//!
//! ```text
//!   zoom / pan event (host)
//!       │
//!       ▼
//!   ConditionalLayerGroup::reconcile(&context)
//!       │  evaluates each condition, issues minimal add/remove calls
//!       ▼
//!   GroupContainer (LayerStore or host container)
//!       │
//!       ▼
//!   LayerStore::evaluate() ──► FrameChanges ──► host renderer
//! ```
//!
//! **[`conditional`]** — [`ConditionalLayerGroup`], the registry of
//! conditions and activation flags, and [`LayerRef`] for addressing a layer
//! by handle or by identifier.
//!
//! **[`container`]** — The [`GroupContainer`] trait: the slice of a host
//! layer container the group needs.
//!
//! **[`layer`]** — [`LayerStore`], a struct-of-arrays layer container with
//! generational handles that implements [`GroupContainer`].
//!
//! **[`dirty`]** — Dirty-tracking channels via `understory_dirty`. Membership,
//! content, and topology changes are drained by
//! [`evaluate`](LayerStore::evaluate).
//!
//! **[`view`]** — [`MapView`](view::MapView) context and condition builders
//! for zoom thresholds and viewport overlap.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! reconciliation instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-layer
//!   transition events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod conditional;
pub mod container;
pub mod dirty;
pub mod layer;
pub mod trace;
pub mod view;

pub use conditional::{ConditionalLayerGroup, LayerRef};
pub use container::GroupContainer;
pub use layer::{FrameChanges, LayerId, LayerStore, SurfaceId};
