//! Viewport-responsive print area adjustment
//!
//! Supplier print areas are defined against a flat desktop mockup. On narrow
//! canvases the same rectangle runs into the garment's neckline, so its top
//! edge is pushed down to a fixed fraction of the canvas height. Only `y`
//! ever changes; the area keeps its supplier size.

use tracing::debug;

use crate::domain::{
    CanonicalRect, PixelDelta, PrintArea, RenderedCanvasSize, ORIGINAL_CANVAS_UNITS,
};

use super::coordinate::pixel_delta_to_canonical;

/// Tolerance when comparing top-edge fractions
const TOP_PCT_EPSILON: f64 = 1e-9;

/// One step of the breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Rendered widths at or below this value select the step
    pub max_width_px: f64,
    /// Desired top edge as a fraction of canvas height
    pub top_pct: f64,
}

/// Default breakpoints, narrowest first
pub const DEFAULT_BREAKPOINTS: [Breakpoint; 2] = [
    Breakpoint { max_width_px: 340.0, top_pct: 0.28 },
    Breakpoint { max_width_px: 420.0, top_pct: 0.24 },
];

/// Computes the adjusted print area for a rendered canvas width
#[derive(Debug, Clone)]
pub struct PrintAreaAdjuster {
    breakpoints: Vec<Breakpoint>,
}

impl Default for PrintAreaAdjuster {
    fn default() -> Self {
        PrintAreaAdjuster::new(DEFAULT_BREAKPOINTS.to_vec())
    }
}

impl PrintAreaAdjuster {
    /// Build an adjuster from a breakpoint table (any order)
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Self {
        breakpoints.sort_by(|a, b| a.max_width_px.total_cmp(&b.max_width_px));
        PrintAreaAdjuster { breakpoints }
    }

    /// Top-edge fraction for the given width, or `original` above every breakpoint
    pub fn desired_top_pct(&self, rendered_width: f64, original: f64) -> f64 {
        self.breakpoints
            .iter()
            .find(|bp| rendered_width <= bp.max_width_px)
            .map(|bp| bp.top_pct)
            .unwrap_or(original)
    }

    /// Adjusted print area for the given rendered canvas size
    ///
    /// An unmeasured canvas gets the supplier area unchanged.
    pub fn adjust(&self, print_area: &PrintArea, rendered: RenderedCanvasSize) -> CanonicalRect {
        if !rendered.is_measured() {
            return *print_area;
        }

        let original_top_pct = print_area.y / ORIGINAL_CANVAS_UNITS;
        let desired_top_pct = self.desired_top_pct(rendered.w, original_top_pct);
        if (desired_top_pct - original_top_pct).abs() <= TOP_PCT_EPSILON {
            return *print_area;
        }

        let delta_px = (desired_top_pct - original_top_pct) * rendered.effective_h();
        let delta = pixel_delta_to_canonical(PixelDelta::new(0.0, delta_px), rendered);
        let max_y = (ORIGINAL_CANVAS_UNITS - print_area.height).max(0.0);
        let new_y = (print_area.y + delta.dy).clamp(0.0, max_y).round();

        debug!(
            rendered_width = rendered.w,
            original_y = print_area.y,
            adjusted_y = new_y,
            "Adjusted print area for narrow canvas"
        );

        CanonicalRect {
            y: new_y,
            ..*print_area
        }
    }
}
