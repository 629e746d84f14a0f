//! Design placement canvas
//!
//! Ties the geometry helpers, the placement state and the two gesture
//! controllers together. The host feeds it template selections, design
//! loads, canvas size changes and pointer events; it answers with snapshots
//! and, at submission, a [`PlacementRecord`].
//!
//! At most one gesture is active at a time. A gesture started on a handle
//! belongs to that handle until the pointer is released.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::{
    effective_min_size, CanonicalRect, DesignImage, DesignPlacement, PercentRect, PixelDelta,
    PlacementRecord, PrintArea, RenderedCanvasSize, TemplateSummary,
};

use super::coordinate::{canonical_to_percent, canonical_to_pixels, PixelRect};
use super::drag::DragGesture;
use super::emitter::PlacementEmitter;
use super::print_area::PrintAreaAdjuster;
use super::resize::{ResizeGesture, ResizeHandle};
use super::state::DesignPlacementState;

/// Canvas operation errors
#[derive(Debug, Error, PartialEq)]
pub enum CanvasError {
    #[error("No product template selected")]
    NoTemplate,
    #[error("No design image loaded")]
    NoDesign,
    #[error("A {0} gesture is already in progress")]
    GestureInProgress(GestureKind),
    #[error("Invalid design image reference: {0}")]
    InvalidDesignReference(String),
}

/// Kind of gesture currently holding the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", content = "handle", rename_all = "snake_case")]
pub enum GestureKind {
    Drag,
    Resize(ResizeHandle),
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureKind::Drag => write!(f, "drag"),
            GestureKind::Resize(handle) => write!(f, "resize ({})", handle),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ActiveGesture {
    Drag(DragGesture),
    Resize(ResizeGesture),
}

impl ActiveGesture {
    fn kind(&self) -> GestureKind {
        match self {
            ActiveGesture::Drag(_) => GestureKind::Drag,
            ActiveGesture::Resize(gesture) => GestureKind::Resize(gesture.handle()),
        }
    }
}

/// Selected template and its supplier print area
#[derive(Debug, Clone)]
struct SelectedTemplate {
    summary: TemplateSummary,
    print_area: PrintArea,
}

/// Read-only view of the canvas for rendering
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CanvasSnapshot {
    pub template: Option<TemplateSummary>,
    pub design: Option<DesignImage>,
    pub rendered_size: RenderedCanvasSize,
    pub print_area: Option<CanonicalRect>,
    pub adjusted_print_area: Option<CanonicalRect>,
    pub placement: Option<CanonicalRect>,
    /// Design overlay as fractions of the canvas container
    pub overlay: Option<PercentRect>,
    /// Design overlay in rendered pixels, once the canvas is measured
    pub overlay_px: Option<PixelRect>,
    /// Print-area guide as fractions of the canvas container
    pub print_area_overlay: Option<PercentRect>,
    pub active_gesture: Option<GestureKind>,
}

#[derive(Debug)]
pub struct PlacementCanvas {
    template: Option<SelectedTemplate>,
    design: Option<DesignImage>,
    rendered: RenderedCanvasSize,
    adjuster: PrintAreaAdjuster,
    adjusted_area: Option<CanonicalRect>,
    state: DesignPlacementState,
    gesture: Option<ActiveGesture>,
}

impl PlacementCanvas {
    pub fn new(emitter: PlacementEmitter) -> Self {
        PlacementCanvas::with_adjuster(emitter, PrintAreaAdjuster::default())
    }

    pub fn with_adjuster(emitter: PlacementEmitter, adjuster: PrintAreaAdjuster) -> Self {
        PlacementCanvas {
            template: None,
            design: None,
            rendered: RenderedCanvasSize::UNMEASURED,
            adjuster,
            adjusted_area: None,
            state: DesignPlacementState::new(emitter),
            gesture: None,
        }
    }

    /// Select a product template; any design and placement are discarded
    pub fn select_template(&mut self, summary: TemplateSummary, print_area: PrintArea) {
        debug!(template_id = %summary.id, "Template selected");
        self.gesture = None;
        self.design = None;
        self.state.reset();
        self.adjusted_area = Some(self.adjuster.adjust(&print_area, self.rendered));
        self.template = Some(SelectedTemplate { summary, print_area });
    }

    /// Load a design image and place it at the default position
    pub fn load_design(&mut self, design: DesignImage) -> Result<DesignPlacement, CanvasError> {
        let area = self.adjusted_area.ok_or(CanvasError::NoTemplate)?;
        self.gesture = None;
        self.design = Some(design);
        Ok(self.state.initialize(&area))
    }

    /// Remove the design; the placement goes with it
    pub fn remove_design(&mut self) {
        self.gesture = None;
        self.design = None;
        self.state.reset();
    }

    /// The host measured the canvas element (again)
    pub fn canvas_resized(&mut self, rendered: RenderedCanvasSize) {
        self.rendered = rendered;
        let Some(selected) = &self.template else {
            return;
        };

        let area = self.adjuster.adjust(&selected.print_area, rendered);
        self.adjusted_area = Some(area);
        if let Err(e) = self.state.refit(&area) {
            warn!(error = %e, "Placement could not be refit after canvas resize");
        }
    }

    /// Pointer went down on the design body
    pub fn begin_drag(&mut self) -> Result<(), CanvasError> {
        let placement = self.ready_for_gesture()?;
        debug!(x = placement.position.x, y = placement.position.y, "Drag started");
        self.gesture = Some(ActiveGesture::Drag(DragGesture::begin(placement.position)));
        Ok(())
    }

    /// Pointer went down on a resize handle
    pub fn begin_resize(&mut self, handle: ResizeHandle) -> Result<(), CanvasError> {
        let placement = self.ready_for_gesture()?;
        debug!(%handle, "Resize started");
        self.gesture = Some(ActiveGesture::Resize(ResizeGesture::begin(
            handle,
            placement.rect(),
        )));
        Ok(())
    }

    /// Pointer moved; `movement` is cumulative since the gesture started
    ///
    /// Returns whether the placement changed. Movement with no active gesture
    /// is ignored.
    pub fn pointer_moved(&mut self, movement: PixelDelta) -> bool {
        let (Some(gesture), Some(area)) = (self.gesture, self.adjusted_area) else {
            warn!("Pointer movement without an active gesture");
            return false;
        };
        let Some(placement) = self.state.placement().copied() else {
            return false;
        };

        let result = match gesture {
            ActiveGesture::Drag(drag) => {
                let position = drag.update(movement, placement.size, self.rendered, &area);
                self.state.apply_position(position, &area)
            }
            ActiveGesture::Resize(resize) => {
                let outcome =
                    resize.update(movement, self.rendered, &area, effective_min_size(&area));
                self.state.apply_resize(outcome.size, outcome.position, &area)
            }
        };

        result.unwrap_or(false)
    }

    /// Pointer released; the gesture reference is discarded
    pub fn end_gesture(&mut self) -> Option<GestureKind> {
        let ended = self.gesture.take().map(|g| g.kind());
        if let Some(kind) = ended {
            debug!(gesture = %kind, "Gesture ended");
        }
        ended
    }

    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.gesture.map(|g| g.kind())
    }

    pub fn placement(&self) -> Option<&DesignPlacement> {
        self.state.placement()
    }

    pub fn adjusted_print_area(&self) -> Option<CanonicalRect> {
        self.adjusted_area
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        let placement = self.state.placement().map(|p| p.rect());
        CanvasSnapshot {
            template: self.template.as_ref().map(|t| t.summary.clone()),
            design: self.design.clone(),
            rendered_size: self.rendered,
            print_area: self.template.as_ref().map(|t| t.print_area),
            adjusted_print_area: self.adjusted_area,
            placement,
            overlay: placement.as_ref().map(canonical_to_percent),
            overlay_px: placement
                .filter(|_| self.rendered.is_measured())
                .map(|rect| canonical_to_pixels(&rect, self.rendered)),
            print_area_overlay: self.adjusted_area.as_ref().map(canonical_to_percent),
            active_gesture: self.active_gesture(),
        }
    }

    /// Package the last emitted placement for product creation
    pub fn submit(&self) -> Result<PlacementRecord, CanvasError> {
        let selected = self.template.as_ref().ok_or(CanvasError::NoTemplate)?;
        let design = self.design.clone().ok_or(CanvasError::NoDesign)?;
        let placement = self.state.emitter().last_emitted().ok_or(CanvasError::NoDesign)?;
        let area = self.adjusted_area.unwrap_or(selected.print_area);

        Ok(PlacementRecord::package(
            selected.summary.clone(),
            design,
            placement,
            area,
            selected.print_area,
        ))
    }

    fn ready_for_gesture(&self) -> Result<DesignPlacement, CanvasError> {
        if let Some(active) = self.gesture {
            return Err(CanvasError::GestureInProgress(active.kind()));
        }
        if self.template.is_none() {
            return Err(CanvasError::NoTemplate);
        }
        self.state.placement().copied().ok_or(CanvasError::NoDesign)
    }
}
