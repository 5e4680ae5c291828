// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! [`LayerStore`](crate::layer::LayerStore) uses multi-channel dirty tracking
//! (via [`understory_dirty`]) to record which layers changed since the host
//! renderer last looked. Each channel represents an independent category of
//! change.
//!
//! All channels are local-only: a layer group is flat, so nothing propagates
//! between layers and every channel is marked with the default policy.
//!
//! - [`MEMBERSHIP`] — the layer was shown or hidden.
//! - [`CONTENT`] — the layer's surface changed.
//! - [`TOPOLOGY`] — the layer was created or destroyed.
//!
//! # Consumption
//!
//! Callers never need to query dirty state directly. Each
//! [`LayerStore::evaluate`](crate::layer::LayerStore::evaluate) call drains
//! all channels and surfaces the results as
//! [`FrameChanges`](crate::layer::FrameChanges).

use understory_dirty::Channel;

/// Visible membership changed.
pub const MEMBERSHIP: Channel = Channel::new(0);

/// Surface content changed.
pub const CONTENT: Channel = Channel::new(1);

/// Layer created or destroyed.
pub const TOPOLOGY: Channel = Channel::new(2);
