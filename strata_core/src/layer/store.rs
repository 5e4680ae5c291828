// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, membership, and content
//! management.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{LayerId, SurfaceId, next_store_tag};
use crate::dirty;

/// Struct-of-arrays storage for the layers of one flat layer group.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer occupies
/// a slot in parallel arrays. Destroyed layers are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// A layer is either a *visible member* of the group or merely stored. Visible
/// members are kept in the order they were shown, which is the order a host
/// renderer draws them in.
#[derive(Debug)]
pub struct LayerStore {
    // -- Properties --
    pub(crate) visible: Vec<bool>,
    pub(crate) content: Vec<Option<SurfaceId>>,

    // -- Membership --
    pub(crate) members: Vec<u32>,

    // -- Allocation --
    pub(crate) tag: u32,
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Last reported state (written by evaluate) --
    pub(crate) reported_visible: Vec<bool>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) pending_retired: Vec<u32>,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: Vec::new(),
            content: Vec::new(),
            members: Vec::new(),
            tag: next_store_tag(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            reported_visible: Vec::new(),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            pending_retired: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new layer and returns its handle.
    ///
    /// The layer starts hidden and without content.
    pub fn create_layer(&mut self) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.visible[idx as usize] = false;
            self.content[idx as usize] = None;
            if self.reported_visible[idx as usize] {
                // The previous occupant was destroyed while still reported
                // visible; evaluate must report it hidden before the new
                // layer's state is compared.
                self.pending_retired.push(idx);
                self.reported_visible[idx as usize] = false;
            }
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.visible.push(false);
            self.content.push(None);
            self.reported_visible.push(false);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        LayerId {
            idx,
            generation: self.generation[idx as usize],
            store: self.tag,
        }
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// A visible layer is hidden first.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another store.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;

        if self.visible[idx as usize] {
            self.hide_slot(idx);
        }

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live layer of this store.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        id.store == self.tag
            && id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live layers.
    #[must_use]
    pub fn len_alive(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Membership API --

    /// Makes a layer a visible member of the group.
    ///
    /// Showing a visible layer does nothing.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another store.
    pub fn show(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        if self.visible[idx as usize] {
            return;
        }
        self.visible[idx as usize] = true;
        self.members.push(idx);
        self.dirty.mark(idx, dirty::MEMBERSHIP);
    }

    /// Removes a layer from the group's visible members.
    ///
    /// Hiding a hidden layer does nothing.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another store.
    pub fn hide(&mut self, id: LayerId) {
        self.validate(id);
        if self.visible[id.idx as usize] {
            self.hide_slot(id.idx);
        }
    }

    /// Returns whether a layer is a visible member of the group.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another store.
    #[must_use]
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    /// Returns the visible members in the order they were shown.
    #[must_use]
    pub fn visible_layers(&self) -> Vec<LayerId> {
        self.members
            .iter()
            .map(|&idx| LayerId {
                idx,
                generation: self.generation[idx as usize],
                store: self.tag,
            })
            .collect()
    }

    // -- Content API --

    /// Returns the surface content of a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another store.
    #[must_use]
    pub fn content(&self, id: LayerId) -> Option<SurfaceId> {
        self.validate(id);
        self.content[id.idx as usize]
    }

    /// Sets the surface content of a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another store.
    pub fn set_content(&mut self, id: LayerId, content: Option<SurfaceId>) {
        self.validate(id);
        self.content[id.idx as usize] = content;
        self.dirty.mark(id.idx, dirty::CONTENT);
    }

    // -- Raw-index accessors for renderers --
    //
    // These accept raw slot indices (as found in `FrameChanges`) rather than
    // `LayerId` handles, skipping generation validation.

    /// Returns the surface content at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn content_at(&self, idx: u32) -> Option<SurfaceId> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.content[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale or foreign.
    fn validate(&self, id: LayerId) {
        assert!(id.store == self.tag, "LayerId {id:?} belongs to another store");
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn hide_slot(&mut self, idx: u32) {
        self.visible[idx as usize] = false;
        self.members.retain(|&m| m != idx);
        self.dirty.mark(idx, dirty::MEMBERSHIP);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        assert!(store.is_alive(id));
        assert_eq!(store.len_alive(), 1);
        store.destroy_layer(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.len_alive(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = LayerStore::new();
        let id1 = store.create_layer();
        store.destroy_layer(id1);
        let id2 = store.create_layer();
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn handles_from_another_store_are_not_alive() {
        let mut a = LayerStore::new();
        let b = LayerStore::new();
        let id = a.create_layer();
        assert!(!b.is_alive(id));
    }

    #[test]
    fn show_and_hide_track_membership_order() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let c = store.create_layer();

        store.show(c);
        store.show(a);
        store.show(b);
        assert_eq!(store.visible_layers(), vec![c, a, b]);

        store.hide(a);
        assert!(!store.is_visible(a));
        assert_eq!(store.visible_layers(), vec![c, b]);
    }

    #[test]
    fn show_twice_keeps_single_membership() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        store.show(a);
        store.show(a);
        assert_eq!(store.visible_layers(), vec![a]);
    }

    #[test]
    fn destroy_hides_visible_layer() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        store.show(a);
        store.destroy_layer(a);
        assert!(store.visible_layers().is_empty());
    }

    #[test]
    fn set_content_round_trips() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        assert_eq!(store.content(id), None);
        store.set_content(id, Some(SurfaceId(7)));
        assert_eq!(store.content(id), Some(SurfaceId(7)));
        assert_eq!(store.content_at(id.idx), Some(SurfaceId(7)));
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_show() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        store.destroy_layer(id);
        store.show(id);
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_destroy() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        store.destroy_layer(id);
        store.destroy_layer(id);
    }

    #[test]
    #[should_panic(expected = "belongs to another store")]
    fn foreign_handle_panics_on_show() {
        let mut a = LayerStore::new();
        let mut b = LayerStore::new();
        let id = a.create_layer();
        let _ = b.create_layer();
        b.show(id);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn content_at_out_of_range_panics() {
        let store = LayerStore::new();
        let _ = store.content_at(0);
    }
}
