// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer groups whose members are shown or hidden by per-layer conditions.
//!
//! A [`ConditionalLayerGroup`] wraps a [`GroupContainer`] and remembers, for
//! each registered layer, a condition over some context type `X` and whether
//! the layer is currently *active* (shown by the group). Each
//! [`reconcile`](ConditionalLayerGroup::reconcile) call evaluates every
//! condition against a fresh context and issues only the add/remove calls
//! needed to make the container match.
//!
//! The typical use is switching representations by zoom level, e.g. a heatmap
//! while zoomed out and individual markers while zoomed in:
//!
//! ```
//! use strata_core::{ConditionalLayerGroup, LayerRef, LayerStore};
//! use strata_core::view::{zoom_at_least, zoom_below};
//!
//! let mut store = LayerStore::new();
//! let heatmap = store.create_layer();
//! let markers = store.create_layer();
//!
//! let mut group = ConditionalLayerGroup::<_, f64>::new(store);
//! group
//!     .register(zoom_below::<f64>(12.0), heatmap)
//!     .register(zoom_at_least::<f64>(12.0), markers)
//!     .reconcile(&10.0);
//! assert!(group.is_active(LayerRef::Id(heatmap)));
//! assert!(!group.is_active(LayerRef::Id(markers)));
//!
//! group.reconcile(&14.0);
//! assert_eq!(group.container().visible_layers(), [markers]);
//! ```
//!
//! Conditions must be pure reads of the context. A condition that panics
//! aborts the pass; entries evaluated before it keep their new state and the
//! rest keep their old one, so `active` still matches visible membership for
//! every entry.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::container::GroupContainer;
#[cfg(feature = "trace-rich")]
use crate::trace::LayerTransitionEvent;
use crate::trace::{ReconcileBeginEvent, ReconcileSummary, Tracer};

/// A layer given either by handle or by its container identifier.
#[derive(Debug)]
pub enum LayerRef<'a, L, I> {
    /// The layer handle; its identifier is looked up in the container.
    Layer(&'a L),
    /// The identifier the container assigned to the layer.
    Id(I),
}

impl<L, I: Copy> Clone for LayerRef<'_, L, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, I: Copy> Copy for LayerRef<'_, L, I> {}

struct ConditionalEntry<L, X: ?Sized> {
    layer: L,
    condition: Box<dyn Fn(&X) -> bool>,
    active: bool,
}

/// Shows and hides layers of a [`GroupContainer`] by per-layer conditions.
///
/// `X` is the context type conditions are evaluated against, commonly an
/// `f64` zoom level or a [`MapView`](crate::view::MapView).
///
/// The group owns its container; pass `&mut container` to borrow one instead
/// (see the `&mut C` impl of [`GroupContainer`]).
pub struct ConditionalLayerGroup<C: GroupContainer, X: ?Sized> {
    container: C,
    entries: BTreeMap<C::Id, ConditionalEntry<C::Layer, X>>,
    passes: u64,
}

impl<C: GroupContainer, X: ?Sized> fmt::Debug for ConditionalLayerGroup<C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalLayerGroup")
            .field("entries", &self.entries.len())
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl<C: GroupContainer, X: ?Sized> ConditionalLayerGroup<C, X> {
    /// Creates an empty group around `container`.
    #[must_use]
    pub fn new(container: C) -> Self {
        Self {
            container,
            entries: BTreeMap::new(),
            passes: 0,
        }
    }

    /// Returns the wrapped container.
    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Returns the wrapped container mutably.
    ///
    /// Showing or hiding a registered layer directly desynchronizes it from
    /// its entry until the next [`reconcile`](Self::reconcile) that flips it.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Consumes the group and returns the container. Layers the group showed
    /// stay visible.
    #[must_use]
    pub fn into_container(self) -> C {
        self.container
    }

    /// Registers `layer` with a visibility condition.
    ///
    /// The entry starts inactive whatever the layer's current visibility; the
    /// next [`reconcile`](Self::reconcile) decides. Registering a layer that
    /// already has an entry replaces the entry. If the replaced entry was
    /// active, the layer is removed from the rendered set first.
    pub fn register<F>(&mut self, condition: F, layer: C::Layer) -> &mut Self
    where
        F: Fn(&X) -> bool + 'static,
    {
        let id = self.container.layer_id(&layer);
        let entry = ConditionalEntry {
            layer,
            condition: Box::new(condition),
            active: false,
        };
        if let Some(old) = self.entries.insert(id, entry) {
            if old.active {
                self.container.remove_visible(id);
            }
        }
        self
    }

    /// Removes a layer's entry, hiding the layer first if it is active.
    ///
    /// Unregistering a layer without an entry does nothing.
    pub fn unregister(&mut self, layer: LayerRef<'_, C::Layer, C::Id>) -> &mut Self {
        let id = self.resolve(layer);
        if let Some(entry) = self.entries.remove(&id) {
            if entry.active {
                self.container.remove_visible(id);
            }
        }
        self
    }

    /// Returns whether the layer has an entry, active or not.
    #[must_use]
    pub fn contains(&self, layer: LayerRef<'_, C::Layer, C::Id>) -> bool {
        self.entries.contains_key(&self.resolve(layer))
    }

    /// Returns whether the layer has an entry that is currently active.
    #[must_use]
    pub fn is_active(&self, layer: LayerRef<'_, C::Layer, C::Id>) -> bool {
        self.entries
            .get(&self.resolve(layer))
            .is_some_and(|e| e.active)
    }

    /// Unregisters every layer.
    pub fn clear(&mut self) -> &mut Self {
        let entries = core::mem::take(&mut self.entries);
        for (id, entry) in entries {
            if entry.active {
                self.container.remove_visible(id);
            }
        }
        self
    }

    /// Returns every registered layer, ordered by identifier.
    ///
    /// The returned vector is a snapshot; later registry changes do not
    /// affect it.
    #[must_use]
    pub fn list(&self) -> Vec<C::Layer> {
        self.entries.values().map(|e| e.layer.clone()).collect()
    }

    /// Returns the layers whose entries are active, ordered by identifier.
    #[must_use]
    pub fn active_layers(&self) -> Vec<C::Layer> {
        self.entries
            .values()
            .filter(|e| e.active)
            .map(|e| e.layer.clone())
            .collect()
    }

    /// Returns the number of registered layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no layer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of reconciliation passes run so far.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Evaluates every condition against `context` and shows or hides layers
    /// whose condition changed since the previous pass.
    ///
    /// Calling it twice with the same context issues no add/remove calls the
    /// second time.
    pub fn reconcile(&mut self, context: &X) -> &mut Self {
        self.passes += 1;
        let container = &mut self.container;
        for (&id, entry) in &mut self.entries {
            apply(container, id, entry, context);
        }
        self
    }

    /// Like [`reconcile`](Self::reconcile), reporting the pass to `tracer`.
    ///
    /// Emits a [`ReconcileBeginEvent`] and a [`ReconcileSummary`], plus a
    /// `LayerTransitionEvent` per add/remove with the `trace-rich` feature.
    pub fn reconcile_traced(&mut self, context: &X, tracer: &mut Tracer<'_>) -> &mut Self
    where
        C::Id: Into<u64>,
    {
        self.passes += 1;
        let pass = self.passes;
        tracer.reconcile_begin(&ReconcileBeginEvent {
            pass,
            entries: self.entries.len() as u64,
        });

        let mut summary = ReconcileSummary {
            pass,
            ..ReconcileSummary::default()
        };
        let container = &mut self.container;
        for (&id, entry) in &mut self.entries {
            let transition = apply(container, id, entry, context);
            summary.evaluated += 1;
            match transition {
                Some(true) => summary.shown += 1,
                Some(false) => summary.hidden += 1,
                None => {}
            }
            if entry.active {
                summary.active += 1;
            }
            #[cfg(feature = "trace-rich")]
            if let Some(shown) = transition {
                tracer.layer_transition(&LayerTransitionEvent {
                    pass,
                    layer: id.into(),
                    shown,
                });
            }
        }

        tracer.reconcile_summary(&summary);
        self
    }

    fn resolve(&self, layer: LayerRef<'_, C::Layer, C::Id>) -> C::Id {
        match layer {
            LayerRef::Layer(layer) => self.container.layer_id(layer),
            LayerRef::Id(id) => id,
        }
    }
}

/// Reconciles one entry. Returns `Some(true)` if the layer was shown,
/// `Some(false)` if it was hidden, and `None` if nothing was issued.
fn apply<C: GroupContainer, X: ?Sized>(
    container: &mut C,
    id: C::Id,
    entry: &mut ConditionalEntry<C::Layer, X>,
    context: &X,
) -> Option<bool> {
    let active = (entry.condition)(context);
    let transition = match (entry.active, active) {
        (false, true) => {
            container.add_visible(&entry.layer);
            Some(true)
        }
        (true, false) => {
            container.remove_visible(id);
            Some(false)
        }
        _ => None,
    };
    entry.active = active;
    transition
}
