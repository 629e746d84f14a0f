//! Forwards committed placements to the hosting form

use tracing::trace;

use crate::domain::CanonicalRect;

/// Receives every accepted placement change
pub trait PlacementListener: Send {
    fn design_updated(&self, rect: &CanonicalRect);
}

impl<F> PlacementListener for F
where
    F: Fn(&CanonicalRect) + Send,
{
    fn design_updated(&self, rect: &CanonicalRect) {
        self(rect)
    }
}

/// Pass-through from placement state to the "design updated" callback
///
/// Remembers the last rectangle it forwarded so the form can package it at
/// submission time.
#[derive(Default)]
pub struct PlacementEmitter {
    listener: Option<Box<dyn PlacementListener>>,
    last: Option<CanonicalRect>,
}

impl PlacementEmitter {
    pub fn new(listener: impl PlacementListener + 'static) -> Self {
        PlacementEmitter {
            listener: Some(Box::new(listener)),
            last: None,
        }
    }

    pub fn emit(&mut self, rect: CanonicalRect) {
        trace!(x = rect.x, y = rect.y, width = rect.width, height = rect.height, "Design updated");
        self.last = Some(rect);
        if let Some(listener) = &self.listener {
            listener.design_updated(&rect);
        }
    }

    /// Last rectangle forwarded, if any
    pub fn last_emitted(&self) -> Option<CanonicalRect> {
        self.last
    }

    /// Forget the last rectangle (design removed or template changed)
    pub fn clear(&mut self) {
        self.last = None;
    }
}

impl std::fmt::Debug for PlacementEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementEmitter")
            .field("attached", &self.listener.is_some())
            .field("last", &self.last)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_calls_listener_and_remembers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut emitter = PlacementEmitter::new(move |rect: &CanonicalRect| {
            sink.lock().unwrap().push(*rect);
        });

        let rect = CanonicalRect::new(10.0, 20.0, 300.0, 400.0);
        emitter.emit(rect);

        assert_eq!(emitter.last_emitted(), Some(rect));
        assert_eq!(seen.lock().unwrap().as_slice(), &[rect]);

        emitter.clear();
        assert_eq!(emitter.last_emitted(), None);
    }
}
