//! Domain types and models

pub mod geometry;
mod placement;

pub use geometry::{
    CanonicalDelta, CanonicalRect, PercentRect, PixelDelta, Position, PrintArea,
    RenderedCanvasSize, Size, ORIGINAL_CANVAS_UNITS,
};
pub use placement::{
    effective_min_size, DesignImage, DesignPlacement, FulfillmentPosition, PlacementError,
    PlacementRecord, PlacementType, TemplateSummary,
};
