//! Resize gestures for the eight overlay handles
//!
//! Each handle drives a subset of the design's edges. Pointer movement is
//! applied to those edges, the size floor is enforced, and only then is the
//! result clamped to the print area, so a handle dragged far outside stops at
//! the boundary instead of overshooting.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CanonicalRect, PixelDelta, Position, RenderedCanvasSize, Size};

use super::coordinate::pixel_delta_to_canonical;

/// Which edges of the design a handle moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeSet {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl EdgeSet {
    /// Whether the design's origin moves with this edge set
    pub fn moves_origin(&self) -> bool {
        self.top || self.left
    }
}

/// Resize handle on the design overlay (4 edges + 4 corners)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    pub fn edges(self) -> EdgeSet {
        let mut edges = EdgeSet::default();
        match self {
            ResizeHandle::Top => edges.top = true,
            ResizeHandle::Bottom => edges.bottom = true,
            ResizeHandle::Left => edges.left = true,
            ResizeHandle::Right => edges.right = true,
            ResizeHandle::TopLeft => {
                edges.top = true;
                edges.left = true;
            }
            ResizeHandle::TopRight => {
                edges.top = true;
                edges.right = true;
            }
            ResizeHandle::BottomLeft => {
                edges.bottom = true;
                edges.left = true;
            }
            ResizeHandle::BottomRight => {
                edges.bottom = true;
                edges.right = true;
            }
        }
        edges
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::Top => "top",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::Left => "left",
            ResizeHandle::Right => "right",
            ResizeHandle::TopLeft => "top_left",
            ResizeHandle::TopRight => "top_right",
            ResizeHandle::BottomLeft => "bottom_left",
            ResizeHandle::BottomRight => "bottom_right",
        }
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one resize tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub size: Size,
    /// New origin, only for handles that move the top or left edge
    pub position: Option<Position>,
}

/// An in-progress resize from one handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    handle: ResizeHandle,
    reference: CanonicalRect,
}

impl ResizeGesture {
    /// Start resizing from the design's current rectangle
    pub fn begin(handle: ResizeHandle, reference: CanonicalRect) -> Self {
        ResizeGesture { handle, reference }
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    /// Size (and origin) for the given cumulative pointer movement
    pub fn update(
        &self,
        movement: PixelDelta,
        rendered: RenderedCanvasSize,
        area: &CanonicalRect,
        min: Size,
    ) -> ResizeOutcome {
        let edges = self.handle.edges();
        let delta = pixel_delta_to_canonical(movement, rendered);
        let reference = self.reference;

        let (mut x, mut y) = (reference.x, reference.y);
        let (mut width, mut height) = (reference.width, reference.height);

        if edges.right {
            width += delta.dx;
        }
        if edges.bottom {
            height += delta.dy;
        }
        if edges.left {
            width -= delta.dx;
            x += delta.dx;
        }
        if edges.top {
            height -= delta.dy;
            y += delta.dy;
        }

        // Size floor; the opposite edge stays where it was
        if width < min.width {
            width = min.width;
            if edges.left {
                x = reference.right() - width;
            }
        }
        if height < min.height {
            height = min.height;
            if edges.top {
                y = reference.bottom() - height;
            }
        }

        // Print area boundary
        if x < area.x {
            width -= area.x - x;
            x = area.x;
        }
        if y < area.y {
            height -= area.y - y;
            y = area.y;
        }
        if x + width > area.right() {
            width = area.right() - x;
        }
        if y + height > area.bottom() {
            height = area.bottom() - y;
        }

        ResizeOutcome {
            size: Size::new(width, height),
            position: edges.moves_origin().then_some(Position::new(x, y)),
        }
    }
}
