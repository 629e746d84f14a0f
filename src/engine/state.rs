//! Authoritative design placement state
//!
//! The only writable copy of the placement. Gesture controllers propose new
//! values; every proposal is re-validated against the print area and the
//! size floor before it replaces the current placement.

use tracing::warn;

use crate::domain::{
    effective_min_size, CanonicalRect, DesignPlacement, PlacementError, Position, Size,
};

use super::drag::clamp_position;
use super::emitter::PlacementEmitter;

#[derive(Debug)]
pub struct DesignPlacementState {
    placement: Option<DesignPlacement>,
    emitter: PlacementEmitter,
}

impl DesignPlacementState {
    pub fn new(emitter: PlacementEmitter) -> Self {
        DesignPlacementState {
            placement: None,
            emitter,
        }
    }

    pub fn placement(&self) -> Option<&DesignPlacement> {
        self.placement.as_ref()
    }

    pub fn emitter(&self) -> &PlacementEmitter {
        &self.emitter
    }

    /// Install the default placement for a freshly loaded design
    pub fn initialize(&mut self, area: &CanonicalRect) -> DesignPlacement {
        let placement = DesignPlacement::centered_in(area);
        self.placement = Some(placement);
        self.emitter.emit(placement.rect());
        placement
    }

    /// Drop the placement (design removed or template changed)
    pub fn reset(&mut self) {
        self.placement = None;
        self.emitter.clear();
    }

    /// Move the design, keeping its size
    pub fn apply_position(
        &mut self,
        position: Position,
        area: &CanonicalRect,
    ) -> Result<bool, PlacementError> {
        let Some(current) = self.placement else {
            return Ok(false);
        };
        self.commit(DesignPlacement::new(position, current.size), area)
    }

    /// Resize the design, optionally moving its origin
    pub fn apply_resize(
        &mut self,
        size: Size,
        position: Option<Position>,
        area: &CanonicalRect,
    ) -> Result<bool, PlacementError> {
        let Some(current) = self.placement else {
            return Ok(false);
        };
        let position = position.unwrap_or(current.position);
        self.commit(DesignPlacement::new(position, size), area)
    }

    /// Fit the current placement into a new print area
    ///
    /// The design is shrunk only when it no longer fits, then translated
    /// inside.
    pub fn refit(&mut self, area: &CanonicalRect) -> Result<bool, PlacementError> {
        let Some(current) = self.placement else {
            return Ok(false);
        };

        let min = effective_min_size(area);
        let size = Size::new(
            current.size.width.min(area.width).max(min.width),
            current.size.height.min(area.height).max(min.height),
        );
        let position = clamp_position(current.position, size, area);
        self.commit(DesignPlacement::new(position, size), area)
    }

    /// Validate and store a candidate, emitting it when it differs
    ///
    /// Returns `Ok(true)` when the placement changed.
    fn commit(
        &mut self,
        candidate: DesignPlacement,
        area: &CanonicalRect,
    ) -> Result<bool, PlacementError> {
        if let Err(e) = candidate.validate(area) {
            warn!(error = %e, candidate = ?candidate, "Rejected placement update");
            return Err(e);
        }

        if self.placement == Some(candidate) {
            return Ok(false);
        }

        self.placement = Some(candidate);
        self.emitter.emit(candidate.rect());
        Ok(true)
    }
}
