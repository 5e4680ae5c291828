// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer and surface identity types.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

static NEXT_STORE_TAG: AtomicU32 = AtomicU32::new(0);

/// Returns a tag unique to one [`LayerStore`](super::LayerStore) instance.
pub(crate) fn next_store_tag() -> u32 {
    NEXT_STORE_TAG.fetch_add(1, Ordering::Relaxed)
}

/// A handle to a layer in a [`LayerStore`](super::LayerStore).
///
/// Contains a slot index and a generation counter so that stale handles can
/// be detected after a layer is destroyed and the slot is reused, plus the
/// tag of the store that issued it so handles from two stores never alias.
///
/// Ordering is by slot index first; it exists so handles can key ordered
/// maps and carries no meaning beyond that.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
    /// Tag of the issuing store.
    pub(crate) store: u32,
}

impl LayerId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({}@gen{})", self.idx, self.generation)
    }
}

/// Packs slot index and generation into a diagnostic key for trace events.
impl From<LayerId> for u64 {
    fn from(id: LayerId) -> Self {
        (Self::from(id.generation) << 32) | Self::from(id.idx)
    }
}

/// An opaque reference to the content a layer draws.
///
/// Surfaces (tile pyramids, marker atlases, heatmap textures) are created and
/// managed by the host renderer. A layer with `None` content is an empty
/// placeholder.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}
