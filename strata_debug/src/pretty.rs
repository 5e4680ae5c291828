// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::trace::{LayerTransitionEvent, ReconcileBeginEvent, ReconcileSummary, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    print_quiet: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("print_quiet", &self.print_quiet)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            print_quiet: true,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            print_quiet: true,
        }
    }

    /// Sets whether quiet output is printed (default: yes).
    ///
    /// When off, `[reconcile:begin]` lines are dropped for every pass and
    /// summary lines only appear for passes that showed or hid a layer.
    #[must_use]
    pub fn print_quiet(mut self, print: bool) -> Self {
        self.print_quiet = print;
        self
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        if !self.print_quiet {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[reconcile:begin] pass={} entries={}",
            e.pass, e.entries,
        );
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        if !self.print_quiet && !s.changed() {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[reconcile] pass={} evaluated={} shown={} hidden={} active={}",
            s.pass, s.evaluated, s.shown, s.hidden, s.active,
        );
    }

    fn on_layer_transition(&mut self, e: &LayerTransitionEvent) {
        let verb = if e.shown { "shown" } else { "hidden" };
        let _ = writeln!(
            self.writer,
            "[layer] pass={} layer={}@gen{} {verb}",
            e.pass,
            e.layer & u64::from(u32::MAX),
            e.layer >> 32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_summary() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_reconcile_summary(&ReconcileSummary {
            pass: 3,
            evaluated: 2,
            shown: 1,
            hidden: 1,
            active: 1,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[reconcile]"), "got: {output}");
        assert!(output.contains("pass=3"), "got: {output}");
        assert!(output.contains("shown=1 hidden=1"), "got: {output}");
    }

    #[test]
    fn pretty_print_transition_unpacks_key() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_layer_transition(&LayerTransitionEvent {
            pass: 1,
            layer: (2 << 32) | 5,
            shown: false,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert_eq!(output, "[layer] pass=1 layer=5@gen2 hidden\n");
    }

    #[test]
    fn quiet_mode_skips_unchanged_passes() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).print_quiet(false);
        sink.on_reconcile_begin(&ReconcileBeginEvent {
            pass: 1,
            entries: 2,
        });
        sink.on_reconcile_summary(&ReconcileSummary {
            pass: 1,
            evaluated: 2,
            ..ReconcileSummary::default()
        });
        sink.on_reconcile_summary(&ReconcileSummary {
            pass: 2,
            evaluated: 2,
            shown: 1,
            active: 1,
            ..ReconcileSummary::default()
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert_eq!(output.lines().count(), 1, "got: {output}");
        assert!(output.contains("pass=2"), "got: {output}");
    }
}
