//! Drag gesture: moves the design inside the print area
//!
//! The gesture remembers where the design sat when the pointer went down.
//! Each movement tick carries the cumulative pointer movement since then, so
//! a tick is a pure function of (origin, movement, area) and nothing drifts
//! across gestures.

use crate::domain::{CanonicalRect, PixelDelta, Position, RenderedCanvasSize, Size};

use super::coordinate::pixel_delta_to_canonical;

/// Clamp `value` into `[min, max]`, preferring `min` when the range is empty
fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if max < min {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Clamp a top-left position so a rectangle of `size` stays inside `area`
///
/// Each axis is clamped independently.
pub fn clamp_position(candidate: Position, size: Size, area: &CanonicalRect) -> Position {
    Position {
        x: clamp_axis(candidate.x, area.x, area.right() - size.width),
        y: clamp_axis(candidate.y, area.y, area.bottom() - size.height),
    }
}

/// An in-progress drag of the design body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    origin: Position,
}

impl DragGesture {
    /// Start a drag from the design's current position
    pub fn begin(origin: Position) -> Self {
        DragGesture { origin }
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Position for the given cumulative pointer movement
    pub fn update(
        &self,
        movement: PixelDelta,
        size: Size,
        rendered: RenderedCanvasSize,
        area: &CanonicalRect,
    ) -> Position {
        let delta = pixel_delta_to_canonical(movement, rendered);
        let candidate = Position::new(self.origin.x + delta.dx, self.origin.y + delta.dy);
        clamp_position(candidate, size, area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One pixel per canonical unit
    fn unit_scale() -> RenderedCanvasSize {
        RenderedCanvasSize::new(3000.0, 3000.0)
    }

    fn area() -> CanonicalRect {
        CanonicalRect::new(100.0, 100.0, 500.0, 500.0)
    }

    #[test]
    fn test_drag_clamps_to_right_edge() {
        let gesture = DragGesture::begin(Position::new(150.0, 150.0));
        let position = gesture.update(
            PixelDelta::new(1000.0, 0.0),
            Size::new(200.0, 200.0),
            unit_scale(),
            &area(),
        );
        assert_eq!(position, Position::new(400.0, 150.0));
    }

    #[test]
    fn test_axes_clamp_independently() {
        let gesture = DragGesture::begin(Position::new(150.0, 150.0));
        let size = Size::new(200.0, 200.0);

        let position = gesture.update(PixelDelta::new(-500.0, 75.0), size, unit_scale(), &area());
        assert_eq!(position, Position::new(100.0, 225.0));

        let position = gesture.update(PixelDelta::new(60.0, 9000.0), size, unit_scale(), &area());
        assert_eq!(position, Position::new(210.0, 400.0));
    }

    #[test]
    fn test_movement_is_cumulative_from_origin() {
        let gesture = DragGesture::begin(Position::new(150.0, 150.0));
        let size = Size::new(200.0, 200.0);

        // A tick that runs into the wall does not affect the next tick
        gesture.update(PixelDelta::new(5000.0, 0.0), size, unit_scale(), &area());
        let position = gesture.update(PixelDelta::new(10.0, 10.0), size, unit_scale(), &area());
        assert_eq!(position, Position::new(160.0, 160.0));
    }

    #[test]
    fn test_pixels_are_scaled_to_canonical() {
        let gesture = DragGesture::begin(Position::new(150.0, 150.0));
        let position = gesture.update(
            PixelDelta::new(10.0, 20.0),
            Size::new(200.0, 200.0),
            RenderedCanvasSize::new(300.0, 600.0),
            &CanonicalRect::new(0.0, 0.0, 3000.0, 3000.0),
        );
        assert_eq!(position, Position::new(250.0, 250.0));
    }

    #[test]
    fn test_unmeasured_canvas_does_not_move() {
        let gesture = DragGesture::begin(Position::new(150.0, 150.0));
        let position = gesture.update(
            PixelDelta::new(40.0, 40.0),
            Size::new(200.0, 200.0),
            RenderedCanvasSize::UNMEASURED,
            &area(),
        );
        assert_eq!(position, gesture.origin());
    }

    #[test]
    fn test_clamp_axis_empty_range() {
        assert_eq!(clamp_axis(42.0, 100.0, 50.0), 100.0);
        assert_eq!(clamp_axis(42.0, 0.0, 50.0), 42.0);
    }
}
