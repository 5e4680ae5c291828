// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use strata_core::trace::{LayerTransitionEvent, ReconcileBeginEvent, ReconcileSummary, TraceSink};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_RECONCILE_BEGIN: u8 = 1;
const TAG_RECONCILE_SUMMARY: u8 = 2;
const TAG_LAYER_TRANSITION: u8 = 3;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }
}

impl TraceSink for RecorderSink {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        self.write_u8(TAG_RECONCILE_BEGIN);
        self.write_u64(e.pass);
        self.write_u64(e.entries);
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        self.write_u8(TAG_RECONCILE_SUMMARY);
        self.write_u64(s.pass);
        self.write_u64(s.evaluated);
        self.write_u64(s.shown);
        self.write_u64(s.hidden);
        self.write_u64(s.active);
    }

    fn on_layer_transition(&mut self, e: &LayerTransitionEvent) {
        self.write_u8(TAG_LAYER_TRANSITION);
        self.write_u64(e.pass);
        self.write_u64(e.layer);
        self.write_u8(u8::from(e.shown));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`ReconcileBeginEvent`].
    ReconcileBegin(ReconcileBeginEvent),
    /// A [`ReconcileSummary`].
    ReconcileSummary(ReconcileSummary),
    /// A [`LayerTransitionEvent`].
    LayerTransition(LayerTransitionEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn decode_reconcile_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ReconcileBegin(ReconcileBeginEvent {
            pass: self.read_u64()?,
            entries: self.read_u64()?,
        }))
    }

    fn decode_reconcile_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ReconcileSummary(ReconcileSummary {
            pass: self.read_u64()?,
            evaluated: self.read_u64()?,
            shown: self.read_u64()?,
            hidden: self.read_u64()?,
            active: self.read_u64()?,
        }))
    }

    fn decode_layer_transition(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerTransition(LayerTransitionEvent {
            pass: self.read_u64()?,
            layer: self.read_u64()?,
            shown: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_RECONCILE_BEGIN => self.decode_reconcile_begin(),
            TAG_RECONCILE_SUMMARY => self.decode_reconcile_summary(),
            TAG_LAYER_TRANSITION => self.decode_layer_transition(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use strata_core::trace::Tracer;
    use strata_core::{ConditionalLayerGroup, LayerStore};

    use super::*;

    #[test]
    fn records_a_traced_pass_in_order() {
        let mut store = LayerStore::new();
        let low = store.create_layer();
        let high = store.create_layer();
        let mut group = ConditionalLayerGroup::<_, f64>::new(store);
        group
            .register(|z: &f64| *z < 12.0, low)
            .register(|z: &f64| *z >= 12.0, high);

        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            group.reconcile_traced(&14.0, &mut tracer);
        }

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            [
                RecordedEvent::ReconcileBegin(ReconcileBeginEvent {
                    pass: 1,
                    entries: 2,
                }),
                RecordedEvent::LayerTransition(LayerTransitionEvent {
                    pass: 1,
                    layer: u64::from(high),
                    shown: true,
                }),
                RecordedEvent::ReconcileSummary(ReconcileSummary {
                    pass: 1,
                    evaluated: 2,
                    shown: 1,
                    hidden: 0,
                    active: 1,
                }),
            ]
        );
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_reconcile_begin(&ReconcileBeginEvent {
            pass: 4,
            entries: 1,
        });
        rec.on_reconcile_summary(&ReconcileSummary {
            pass: 4,
            ..ReconcileSummary::default()
        });
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert_eq!(events.len(), 1, "only the complete record decodes");
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let events: Vec<_> = decode(&[0xff, 0, 0, 0]).collect();
        assert!(events.is_empty());
    }
}
