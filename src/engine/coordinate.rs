//! Conversions between canonical units and rendered pixels
//!
//! Three spaces are involved: the canonical canvas (fixed, supplier units),
//! the rendered canvas (responsive, pixels) and pointer movement (pixels).
//! Everything here is a pure function of its inputs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    CanonicalDelta, CanonicalRect, PercentRect, PixelDelta, RenderedCanvasSize,
    ORIGINAL_CANVAS_UNITS,
};

/// Canonical units per rendered pixel on each axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactor {
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Canonical units per pixel for the given rendered size
///
/// Dimensions below one pixel are treated as one, so an unmeasured canvas
/// never yields NaN or infinity.
pub fn scale_factor(rendered: RenderedCanvasSize) -> ScaleFactor {
    ScaleFactor {
        scale_x: ORIGINAL_CANVAS_UNITS / rendered.effective_w(),
        scale_y: ORIGINAL_CANVAS_UNITS / rendered.effective_h(),
    }
}

/// Convert pointer movement to canonical units
///
/// Before the canvas is measured the conversion is inert and returns a zero
/// delta.
pub fn pixel_delta_to_canonical(delta: PixelDelta, rendered: RenderedCanvasSize) -> CanonicalDelta {
    if !rendered.is_measured() || !delta.dx.is_finite() || !delta.dy.is_finite() {
        return CanonicalDelta::ZERO;
    }

    let scale = scale_factor(rendered);
    CanonicalDelta {
        dx: delta.dx * scale.scale_x,
        dy: delta.dy * scale.scale_y,
    }
}

/// Express a canonical rectangle as fractions of the canvas container
pub fn canonical_to_percent(rect: &CanonicalRect) -> PercentRect {
    PercentRect {
        left_pct: rect.x / ORIGINAL_CANVAS_UNITS,
        top_pct: rect.y / ORIGINAL_CANVAS_UNITS,
        width_pct: rect.width / ORIGINAL_CANVAS_UNITS,
        height_pct: rect.height / ORIGINAL_CANVAS_UNITS,
    }
}

/// Inverse of [`canonical_to_percent`]
pub fn percent_to_canonical(pct: &PercentRect) -> CanonicalRect {
    CanonicalRect {
        x: pct.left_pct * ORIGINAL_CANVAS_UNITS,
        y: pct.top_pct * ORIGINAL_CANVAS_UNITS,
        width: pct.width_pct * ORIGINAL_CANVAS_UNITS,
        height: pct.height_pct * ORIGINAL_CANVAS_UNITS,
    }
}

/// Rectangle in rendered pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Position a canonical rectangle on the rendered canvas
pub fn canonical_to_pixels(rect: &CanonicalRect, rendered: RenderedCanvasSize) -> PixelRect {
    let pct = canonical_to_percent(rect);
    let (w, h) = (rendered.effective_w(), rendered.effective_h());
    PixelRect {
        left: pct.left_pct * w,
        top: pct.top_pct * h,
        width: pct.width_pct * w,
        height: pct.height_pct * h,
    }
}
