// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a JSON array with one object per event, for loading
//! into notebooks or diffing between runs.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a pretty-printed JSON array.
///
/// Every object has an `"event"` name and the pass it belongs to. Layer keys
/// are split back into slot index and generation.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(event_json).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn event_json(recorded: RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::ReconcileBegin(e) => json!({
            "event": "reconcile_begin",
            "pass": e.pass,
            "entries": e.entries,
        }),
        RecordedEvent::ReconcileSummary(s) => json!({
            "event": "reconcile_summary",
            "pass": s.pass,
            "evaluated": s.evaluated,
            "shown": s.shown,
            "hidden": s.hidden,
            "active": s.active,
        }),
        RecordedEvent::LayerTransition(e) => {
            let name = if e.shown { "layer_shown" } else { "layer_hidden" };
            json!({
                "event": name,
                "pass": e.pass,
                "layer": {
                    "index": e.layer & u64::from(u32::MAX),
                    "generation": e.layer >> 32,
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use strata_core::trace::{
        LayerTransitionEvent, ReconcileBeginEvent, ReconcileSummary, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_reconcile_begin(&ReconcileBeginEvent {
            pass: 1,
            entries: 2,
        });
        rec.on_layer_transition(&LayerTransitionEvent {
            pass: 1,
            layer: (1 << 32) | 4,
            shown: true,
        });
        rec.on_reconcile_summary(&ReconcileSummary {
            pass: 1,
            evaluated: 2,
            shown: 1,
            hidden: 0,
            active: 1,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "reconcile_begin");
        assert_eq!(parsed[0]["entries"], 2);

        assert_eq!(parsed[1]["event"], "layer_shown");
        assert_eq!(parsed[1]["layer"]["index"], 4);
        assert_eq!(parsed[1]["layer"]["generation"], 1);

        assert_eq!(parsed[2]["event"], "reconcile_summary");
        assert_eq!(parsed[2]["active"], 1);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
