// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group container contract.
//!
//! A *group container* holds a collection of layers and decides which of them
//! are part of the rendered set. Map libraries all have one (a layer group, a
//! feature group, a scene node), and they differ in almost everything else:
//! how layers are represented, how identifiers are assigned, how drawing is
//! triggered. [`ConditionalLayerGroup`](crate::ConditionalLayerGroup) only
//! needs the small slice captured by [`GroupContainer`], so it composes with
//! any of them.
//!
//! [`LayerStore`] implements the trait directly, with [`LayerId`] serving as
//! both the layer handle and its identifier.

use core::fmt::Debug;

use crate::layer::{LayerId, LayerStore};

/// Holds layers and toggles their visible membership.
///
/// Implementations assign each layer a stable identifier. The identifier of a
/// given layer must not change while the layer is held by the container.
pub trait GroupContainer {
    /// The handle callers use to refer to a layer.
    ///
    /// Cloning a handle must not clone the layer itself; it is a reference
    /// into storage the container (or the caller) owns.
    type Layer: Clone;

    /// Stable identifier the container assigns to each layer.
    type Id: Copy + Ord + Debug;

    /// Returns the stable identifier of `layer`.
    fn layer_id(&self, layer: &Self::Layer) -> Self::Id;

    /// Makes `layer` part of the rendered set.
    fn add_visible(&mut self, layer: &Self::Layer);

    /// Removes the layer identified by `id` from the rendered set.
    fn remove_visible(&mut self, id: Self::Id);

    /// Returns whether the layer identified by `id` is part of the rendered set.
    fn is_visible(&self, id: Self::Id) -> bool;
}

impl<C: GroupContainer + ?Sized> GroupContainer for &mut C {
    type Layer = C::Layer;
    type Id = C::Id;

    #[inline]
    fn layer_id(&self, layer: &Self::Layer) -> Self::Id {
        (**self).layer_id(layer)
    }

    #[inline]
    fn add_visible(&mut self, layer: &Self::Layer) {
        (**self).add_visible(layer);
    }

    #[inline]
    fn remove_visible(&mut self, id: Self::Id) {
        (**self).remove_visible(id);
    }

    #[inline]
    fn is_visible(&self, id: Self::Id) -> bool {
        (**self).is_visible(id)
    }
}

/// Uses [`LayerStore`] visible membership as the rendered set.
///
/// Unlike the inherent [`LayerStore`] methods, these never panic: a destroyed
/// or foreign handle is never visible, and adding or removing it does nothing.
impl GroupContainer for LayerStore {
    type Layer = LayerId;
    type Id = LayerId;

    #[inline]
    fn layer_id(&self, layer: &LayerId) -> LayerId {
        *layer
    }

    #[inline]
    fn add_visible(&mut self, layer: &LayerId) {
        if self.is_alive(*layer) {
            self.show(*layer);
        }
    }

    #[inline]
    fn remove_visible(&mut self, id: LayerId) {
        if self.is_alive(id) {
            self.hide(id);
        }
    }

    #[inline]
    fn is_visible(&self, id: LayerId) -> bool {
        self.is_alive(id) && Self::is_visible(self, id)
    }
}
