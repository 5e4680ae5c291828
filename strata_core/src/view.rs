// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map view context and condition builders.
//!
//! Conditions are plain closures, so any context type works with
//! [`ConditionalLayerGroup`](crate::ConditionalLayerGroup). The builders here
//! cover the common cases: zoom thresholds and viewport overlap. They are
//! generic over [`ZoomContext`] / [`ViewportContext`], so a bare `f64` zoom
//! level and a full [`MapView`] both work.
//!
//! ```
//! use strata_core::view::{zoom_at_least, zoom_below};
//!
//! let heatmap = zoom_below::<f64>(12.0);
//! let markers = zoom_at_least::<f64>(12.0);
//! assert!(heatmap(&10.0) && !markers(&10.0));
//! assert!(!heatmap(&12.0) && markers(&12.0));
//! ```

use kurbo::{Point, Rect};

/// A context that carries a zoom level.
pub trait ZoomContext {
    /// Returns the current zoom level.
    fn zoom(&self) -> f64;
}

/// A context that carries the visible map area.
pub trait ViewportContext {
    /// Returns the visible area in map coordinates.
    fn viewport(&self) -> Rect;
}

impl ZoomContext for f64 {
    #[inline]
    fn zoom(&self) -> f64 {
        *self
    }
}

/// Zoom level and visible area of a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    /// Current zoom level.
    pub zoom: f64,
    /// Visible area in map coordinates.
    pub viewport: Rect,
}

impl MapView {
    /// Creates a view.
    #[must_use]
    pub const fn new(zoom: f64, viewport: Rect) -> Self {
        Self { zoom, viewport }
    }

    /// Returns the center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        self.viewport.center()
    }

    /// Returns this view zoomed to `zoom`, keeping the viewport.
    #[must_use]
    pub const fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    /// Returns this view with its viewport moved by `(dx, dy)`.
    #[must_use]
    pub fn panned(self, dx: f64, dy: f64) -> Self {
        let v = self.viewport;
        Self {
            viewport: Rect::new(v.x0 + dx, v.y0 + dy, v.x1 + dx, v.y1 + dy),
            ..self
        }
    }
}

impl ZoomContext for MapView {
    #[inline]
    fn zoom(&self) -> f64 {
        self.zoom
    }
}

impl ViewportContext for MapView {
    #[inline]
    fn viewport(&self) -> Rect {
        self.viewport
    }
}

/// Condition that holds while the zoom level is below `level`.
pub fn zoom_below<X: ZoomContext + ?Sized>(level: f64) -> impl Fn(&X) -> bool {
    move |cx: &X| cx.zoom() < level
}

/// Condition that holds while the zoom level is at least `level`.
pub fn zoom_at_least<X: ZoomContext + ?Sized>(level: f64) -> impl Fn(&X) -> bool {
    move |cx: &X| cx.zoom() >= level
}

/// Condition that holds while the zoom level is in `[min, max)`.
pub fn zoom_within<X: ZoomContext + ?Sized>(min: f64, max: f64) -> impl Fn(&X) -> bool {
    move |cx: &X| {
        let z = cx.zoom();
        z >= min && z < max
    }
}

/// Condition that holds while `bounds` overlaps the viewport with positive
/// area. Rectangles that only touch along an edge do not overlap.
pub fn intersects_viewport<X: ViewportContext + ?Sized>(bounds: Rect) -> impl Fn(&X) -> bool {
    move |cx: &X| cx.viewport().intersect(bounds).area() > 0.0
}
