// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change evaluation for host renderers.
//!
//! Evaluation follows a drain-compare pattern for each dirty channel:
//!
//! 1. **MEMBERSHIP** — Drain dirty indices and compare each layer's
//!    `visible` flag with the value reported by the previous evaluation.
//!    Only real transitions are reported, so a layer shown and hidden again
//!    between two evaluations produces no change.
//! 2. **CONTENT** — Drain dirty indices (no comparison; renderers read the
//!    current surface directly from the store).
//! 3. **TOPOLOGY** — Drain and discard; creation and destruction are
//!    reported through the lifecycle lists instead.
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than [`LayerId`]
//! handles so that renderers can index directly into the store via the
//! `*_at()` accessors (e.g.
//! [`content_at`](super::LayerStore::content_at)).
//!
//! [`LayerId`]: super::LayerId

use alloc::vec::Vec;

use super::store::LayerStore;
use crate::dirty;

/// The set of changes produced by a single [`LayerStore::evaluate`] call.
///
/// Each field contains the raw slot indices of layers that changed in the
/// corresponding category.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Layers that became visible members.
    pub shown: Vec<u32>,
    /// Layers that stopped being visible members.
    pub hidden: Vec<u32>,
    /// Layers whose surface content changed.
    pub content: Vec<u32>,
    /// Layers created since the last evaluate.
    pub added: Vec<u32>,
    /// Layers destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the set of visible members changed.
    pub membership_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.shown.clear();
        self.hidden.clear();
        self.content.clear();
        self.added.clear();
        self.removed.clear();
        self.membership_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
            && self.hidden.is_empty()
            && self.content.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

impl LayerStore {
    /// Evaluates the store, draining dirty state and returning the set of
    /// changes since the previous evaluation.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        // Slots whose previous occupant was destroyed while visible.
        changes.hidden.append(&mut self.pending_retired);

        // Drain MEMBERSHIP channel — report only real transitions.
        let dirty_membership: Vec<u32> = self
            .dirty
            .drain(dirty::MEMBERSHIP)
            .deterministic()
            .run()
            .collect();
        for idx in dirty_membership {
            let now = self.visible[idx as usize];
            if now != self.reported_visible[idx as usize] {
                if now {
                    changes.shown.push(idx);
                } else {
                    changes.hidden.push(idx);
                }
                self.reported_visible[idx as usize] = now;
            }
        }
        changes.membership_changed = !changes.shown.is_empty() || !changes.hidden.is_empty();

        // Drain CONTENT channel.
        changes.content = self
            .dirty
            .drain(dirty::CONTENT)
            .deterministic()
            .run()
            .collect();

        // Drain TOPOLOGY channel (just consume, lifecycle lists carry it).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::SurfaceId;

    #[test]
    fn creation_is_reported_once() {
        let mut store = LayerStore::new();
        let id = store.create_layer();

        let changes = store.evaluate();
        assert_eq!(changes.added, [id.index()]);
        assert!(!changes.membership_changed);

        let changes = store.evaluate();
        assert!(changes.is_empty(), "second evaluate should be quiet");
    }

    #[test]
    fn show_is_reported_once() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        let _ = store.evaluate();

        store.show(id);
        let changes = store.evaluate();
        assert_eq!(changes.shown, [id.index()]);
        assert!(changes.hidden.is_empty());
        assert!(changes.membership_changed);

        let changes = store.evaluate();
        assert!(changes.shown.is_empty(), "show must not be reported twice");
    }

    #[test]
    fn show_then_hide_before_evaluate_cancels_out() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        let _ = store.evaluate();

        store.show(id);
        store.hide(id);
        let changes = store.evaluate();
        assert!(changes.shown.is_empty());
        assert!(changes.hidden.is_empty());
        assert!(!changes.membership_changed);
    }

    #[test]
    fn hide_is_reported() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        store.show(id);
        let _ = store.evaluate();

        store.hide(id);
        let changes = store.evaluate();
        assert_eq!(changes.hidden, [id.index()]);
    }

    #[test]
    fn set_content_marks_dirty() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        let _ = store.evaluate();

        store.set_content(id, Some(SurfaceId(42)));
        let changes = store.evaluate();
        assert!(
            changes.content.contains(&id.index()),
            "content channel should contain the layer"
        );
    }

    #[test]
    fn destroy_visible_layer_reports_hidden_and_removed() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        store.show(id);
        let _ = store.evaluate();

        store.destroy_layer(id);
        let changes = store.evaluate();
        assert_eq!(changes.hidden, [id.index()]);
        assert_eq!(changes.removed, [id.index()]);
    }

    #[test]
    fn reused_slot_reports_retired_occupant_hidden() {
        let mut store = LayerStore::new();
        let old = store.create_layer();
        store.show(old);
        let _ = store.evaluate();

        store.destroy_layer(old);
        let new = store.create_layer();
        store.show(new);
        assert_eq!(old.index(), new.index());

        let changes = store.evaluate();
        assert_eq!(changes.hidden, [old.index()]);
        assert_eq!(changes.shown, [new.index()]);
        assert_eq!(changes.removed, [old.index()]);
        assert_eq!(changes.added, [new.index()]);
    }
}
