// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for reconciliation passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`ConditionalLayerGroup::reconcile_traced`](crate::ConditionalLayerGroup::reconcile_traced)
//! calls as it works. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates per-layer [`LayerTransitionEvent`]s
//!   and the corresponding `TraceSink` method.

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted before a reconciliation pass evaluates any condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconcileBeginEvent {
    /// Monotonic pass counter of the emitting group.
    pub pass: u64,
    /// Number of registered entries about to be evaluated.
    pub entries: u64,
}

/// Emitted after a reconciliation pass evaluated every condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Pass counter.
    pub pass: u64,
    /// Conditions evaluated.
    pub evaluated: u64,
    /// Layers added to the rendered set.
    pub shown: u64,
    /// Layers removed from the rendered set.
    pub hidden: u64,
    /// Entries active after the pass.
    pub active: u64,
}

impl ReconcileSummary {
    /// Returns whether the pass changed the rendered set.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.shown != 0 || self.hidden != 0
    }
}

/// One layer entering or leaving the rendered set.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerTransitionEvent {
    /// Pass counter.
    pub pass: u64,
    /// Diagnostic key of the layer's identifier.
    pub layer: u64,
    /// `true` if the layer was shown, `false` if it was hidden.
    pub shown: bool,
}

// ---------------------------------------------------------------------------
// TraceSink
// ---------------------------------------------------------------------------

/// Receives reconciliation events.
///
/// All methods have default no-op implementations, so you only need to
/// override the ones you care about.
pub trait TraceSink {
    /// Called when a pass starts.
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        _ = e;
    }

    /// Called when a pass finishes.
    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        _ = s;
    }

    /// Called for every add or remove issued during a pass.
    #[cfg(feature = "trace-rich")]
    fn on_layer_transition(&mut self, e: &LayerTransitionEvent) {
        _ = e;
    }
}

/// A sink that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ReconcileBeginEvent`].
    #[inline]
    pub fn reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reconcile_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReconcileSummary`].
    #[inline]
    pub fn reconcile_summary(&mut self, s: &ReconcileSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_reconcile_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`LayerTransitionEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn layer_transition(&mut self, e: &LayerTransitionEvent) {
        if let Some(s) = &mut self.sink {
            s.on_layer_transition(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        begins: u32,
        summaries: u32,
    }

    impl TraceSink for CountingSink {
        fn on_reconcile_begin(&mut self, _e: &ReconcileBeginEvent) {
            self.begins += 1;
        }

        fn on_reconcile_summary(&mut self, _s: &ReconcileSummary) {
            self.summaries += 1;
        }
    }

    #[test]
    fn none_tracer_accepts_events() {
        let mut tracer = Tracer::none();
        tracer.reconcile_begin(&ReconcileBeginEvent {
            pass: 0,
            entries: 0,
        });
        tracer.reconcile_summary(&ReconcileSummary::default());
    }

    #[test]
    fn tracer_dispatch_follows_feature() {
        let mut sink = CountingSink::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.reconcile_begin(&ReconcileBeginEvent {
                pass: 1,
                entries: 2,
            });
            tracer.reconcile_summary(&ReconcileSummary {
                pass: 1,
                ..ReconcileSummary::default()
            });
        }
        let expected = u32::from(cfg!(feature = "trace"));
        assert_eq!(sink.begins, expected, "begin dispatch");
        assert_eq!(sink.summaries, expected, "summary dispatch");
    }

    #[test]
    fn summary_changed_reflects_transitions() {
        let quiet = ReconcileSummary {
            pass: 3,
            evaluated: 4,
            active: 2,
            ..ReconcileSummary::default()
        };
        assert!(!quiet.changed());
        let busy = ReconcileSummary { shown: 1, ..quiet };
        assert!(busy.changed());
    }
}
