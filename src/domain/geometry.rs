//! Canonical canvas geometry
//!
//! Every persisted or transmitted placement is expressed in canonical units:
//! a fixed square of `ORIGINAL_CANVAS_UNITS` per side that matches the
//! print-on-demand template's coordinate system. On-screen pixels only ever
//! appear as transient input (pointer movement, rendered canvas size).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Side length of the canonical canvas square
pub const ORIGINAL_CANVAS_UNITS: f64 = 3000.0;

/// Minimum design width and height in canonical units
pub const MIN_SIZE: f64 = 50.0;

/// Tolerance used when comparing canonical coordinates
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Top-left corner of a rectangle in canonical units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// Width and height in canonical units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned rectangle in canonical units
///
/// Used for the design placement, the supplier print area and the adjusted
/// print area alike.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct CanonicalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Supplier-defined printable region of a garment template
pub type PrintArea = CanonicalRect;

impl CanonicalRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        CanonicalRect { x, y, width, height }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        CanonicalRect {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Whether the rectangle lies inside the canonical canvas square
    pub fn is_within_canvas(&self) -> bool {
        CanonicalRect::canvas().contains(self)
    }

    /// Whether `other` lies fully inside this rectangle (edges inclusive)
    pub fn contains(&self, other: &CanonicalRect) -> bool {
        other.x >= self.x - GEOMETRY_EPSILON
            && other.y >= self.y - GEOMETRY_EPSILON
            && other.right() <= self.right() + GEOMETRY_EPSILON
            && other.bottom() <= self.bottom() + GEOMETRY_EPSILON
    }

    /// The full canonical canvas
    pub fn canvas() -> Self {
        CanonicalRect::new(0.0, 0.0, ORIGINAL_CANVAS_UNITS, ORIGINAL_CANVAS_UNITS)
    }
}

/// On-screen pixel size of the mounted canvas element
///
/// A zero (or otherwise unusable) dimension means the canvas has not been
/// laid out yet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct RenderedCanvasSize {
    pub w: f64,
    pub h: f64,
}

impl RenderedCanvasSize {
    /// Size reported before the first layout pass
    pub const UNMEASURED: RenderedCanvasSize = RenderedCanvasSize { w: 0.0, h: 0.0 };

    pub fn new(w: f64, h: f64) -> Self {
        RenderedCanvasSize { w, h }
    }

    /// True once both dimensions are at least one pixel
    pub fn is_measured(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.w >= 1.0 && self.h >= 1.0
    }

    /// Width floored at one pixel
    pub fn effective_w(&self) -> f64 {
        at_least_one_pixel(self.w)
    }

    /// Height floored at one pixel
    pub fn effective_h(&self) -> f64 {
        at_least_one_pixel(self.h)
    }
}

fn at_least_one_pixel(value: f64) -> f64 {
    if value.is_finite() {
        value.max(1.0)
    } else {
        1.0
    }
}

/// Rectangle expressed as fractions (0.0..=1.0) of the canvas container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct PercentRect {
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}

/// Pointer movement in on-screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct PixelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PixelDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        PixelDelta { dx, dy }
    }
}

/// Movement in canonical units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalDelta {
    pub dx: f64,
    pub dy: f64,
}

impl CanonicalDelta {
    pub const ZERO: CanonicalDelta = CanonicalDelta { dx: 0.0, dy: 0.0 };
}
