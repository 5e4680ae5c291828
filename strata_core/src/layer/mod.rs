// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat layer group storage.
//!
//! A *layer* is one drawable unit of a map (a tile layer, a marker cluster, a
//! heatmap). Each layer in a [`LayerStore`] has:
//!
//! - An identity ([`LayerId`]) — a generational handle that becomes stale when
//!   the layer is destroyed, and that is only valid for the store that issued
//!   it.
//! - **Visible membership** — whether the layer is currently part of the
//!   rendered set, toggled by [`show`](LayerStore::show) and
//!   [`hide`](LayerStore::hide).
//! - **Content** — an optional [`SurfaceId`] naming what the layer draws.
//!
//! # Dirty tracking
//!
//! Mutations automatically mark the corresponding dirty channel (see
//! [`dirty`](crate::dirty)), and [`evaluate`](LayerStore::evaluate) turns them
//! into [`FrameChanges`] for the host renderer.

mod evaluate;
mod id;
mod store;

pub use evaluate::FrameChanges;
pub use id::{LayerId, SurfaceId};
pub use store::LayerStore;
