//! Design placement engine
//!
//! This module contains the canvas core:
//! - Coordinate conversions between canonical units and rendered pixels
//! - Responsive print area adjustment
//! - Placement state with drag and resize gestures
//! - Template catalogue loading

mod coordinate;
mod print_area;
mod state;
mod drag;
mod resize;
mod emitter;
mod canvas;
mod template;

pub use canvas::{CanvasError, CanvasSnapshot, GestureKind, PlacementCanvas};
pub use coordinate::PixelRect;
pub use emitter::PlacementEmitter;
pub use resize::ResizeHandle;
pub use template::{Template, TemplateError, TemplateManager, TemplateMetadata};
