// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated zoom sweep that exercises a conditional layer group.
//!
//! Four layers share one [`LayerStore`]: a heatmap for low zoom, markers and
//! labels for high zoom, and a city footprint that only shows while it
//! overlaps the viewport. The map zooms in, pans away, and zooms back out;
//! every pass is traced to a
//! [`PrettyPrintSink`](strata_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](strata_debug::recorder::RecorderSink), and the recording
//! is exported as JSON.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Rect;
use strata_core::trace::{
    LayerTransitionEvent, ReconcileBeginEvent, ReconcileSummary, TraceSink, Tracer,
};
use strata_core::view::{MapView, intersects_viewport, zoom_at_least, zoom_below, zoom_within};
use strata_core::{ConditionalLayerGroup, LayerStore, SurfaceId};

use strata_debug::pretty::PrettyPrintSink;
use strata_debug::recorder::RecorderSink;

/// Zoom level where the heatmap hands over to markers.
const DETAIL_ZOOM: f64 = 12.0;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        self.a.on_reconcile_begin(e);
        self.b.on_reconcile_begin(e);
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        self.a.on_reconcile_summary(s);
        self.b.on_reconcile_summary(s);
    }

    fn on_layer_transition(&mut self, e: &LayerTransitionEvent) {
        self.a.on_layer_transition(e);
        self.b.on_layer_transition(e);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout())).print_quiet(false);
    let mut recorder = RecorderSink::new();

    // -- layers ------------------------------------------------------------
    let mut store = LayerStore::new();
    let heatmap = store.create_layer();
    let markers = store.create_layer();
    let labels = store.create_layer();
    let footprint = store.create_layer();
    store.set_content(heatmap, Some(SurfaceId(1)));
    store.set_content(markers, Some(SurfaceId(2)));
    store.set_content(labels, Some(SurfaceId(3)));
    store.set_content(footprint, Some(SurfaceId(4)));
    let _ = store.evaluate();

    let mut group = ConditionalLayerGroup::<_, MapView>::new(store);
    group
        .register(zoom_below::<MapView>(DETAIL_ZOOM), heatmap)
        .register(zoom_at_least::<MapView>(DETAIL_ZOOM), markers)
        .register(zoom_within::<MapView>(14.0, 19.0), labels)
        .register(
            intersects_viewport::<MapView>(Rect::new(400.0, 400.0, 600.0, 600.0)),
            footprint,
        );

    // -- simulated view changes -------------------------------------------
    let mut view = MapView::new(3.0, Rect::new(0.0, 0.0, 1000.0, 1000.0));
    let mut steps = Vec::new();
    for zoom in 3..=18 {
        steps.push(view.with_zoom(f64::from(zoom)));
    }
    view = view.with_zoom(18.0);
    for _ in 0..4 {
        view = view.panned(400.0, 0.0);
        steps.push(view);
    }
    for zoom in (3..18).rev() {
        steps.push(view.with_zoom(f64::from(zoom)));
    }

    for view in &steps {
        {
            let mut tee = Tee {
                a: &mut pretty,
                b: &mut recorder,
            };
            let mut tracer = Tracer::new(&mut tee);
            group.reconcile_traced(view, &mut tracer);
        }

        let changes = group.container_mut().evaluate();
        if changes.membership_changed {
            println!(
                "  zoom={:>4.1} center=({:.0}, {:.0}) visible={:?}",
                view.zoom,
                view.center().x,
                view.center().y,
                group.container().visible_layers(),
            );
        }
    }

    // -- export ------------------------------------------------------------
    let path = "zoom_trace.json";
    let file = File::create(path).expect("failed to create zoom_trace.json");
    let mut writer = BufWriter::new(file);
    strata_debug::json::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write JSON trace");

    println!("Wrote {path} ({} passes)", group.passes());
}
