// Copyright contributors to the TeleSABRE Replay Viewer project

//! Per-pane pan/zoom and the draggable splitter between the panes.

use serde::Serialize;

use crate::{config::ViewerConfig, geometry::Point};

/// Uniform scale plus translation, applied as `screen = scale * p + t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanZoom {
    scale: f64,
    tx: f64,
    ty: f64,
    min_scale: f64,
    max_scale: f64,
}

impl PanZoom {
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            tx: 0.0,
            ty: 0.0,
            min_scale,
            max_scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    /// Zoom by `factor` keeping the screen point `focus` fixed.
    pub fn zoom_at(&mut self, focus: Point, factor: f64) {
        let scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        let k = scale / self.scale;
        self.tx = focus.x - k * (focus.x - self.tx);
        self.ty = focus.y - k * (focus.y - self.ty);
        self.scale = scale;
    }

    pub fn reset(&mut self) {
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
        self.tx = 0.0;
        self.ty = 0.0;
    }

    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(self.scale * p.x + self.tx, self.scale * p.y + self.ty)
    }

    pub fn to_surface(&self, p: Point) -> Point {
        Point::new((p.x - self.tx) / self.scale, (p.y - self.ty) / self.scale)
    }

    /// SVG `transform` attribute value.
    pub fn transform(&self) -> String {
        format!(
            "matrix({} 0 0 {} {} {})",
            self.scale, self.scale, self.tx, self.ty
        )
    }
}

/// Width of the right-hand pane, resized by dragging its left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Splitter {
    width: f64,
    min_width: f64,
    dragging: bool,
}

impl Splitter {
    pub fn new(width: f64, min_width: f64) -> Self {
        Self {
            width: width.max(min_width),
            min_width,
            dragging: false,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self) {
        self.dragging = true;
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Pointer at `x` while the pane's left edge is at `pane_left`. Returns
    /// whether the width changed.
    pub fn pointer_move(&mut self, x: f64, pane_left: f64) -> bool {
        if !self.dragging {
            return false;
        }
        let width = (self.width - (x - pane_left)).max(self.min_width);
        let changed = width != self.width;
        self.width = width;
        changed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaneLayout {
    pub topology: PanZoom,
    pub circuit: PanZoom,
    pub splitter: Splitter,
}

impl PaneLayout {
    pub fn new(config: &ViewerConfig) -> Self {
        let view = PanZoom::new(config.min_zoom, config.max_zoom);
        Self {
            topology: view,
            circuit: view,
            splitter: Splitter::new(config.pane_width, config.min_pane_width),
        }
    }
}
