//! Canvas editing sessions
//!
//! Each admin product-creation form gets its own [`PlacementCanvas`]. The
//! store hands out sessions by ID and expires the idle ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::SessionSettings;
use crate::domain::{CanonicalRect, PlacementRecord};
use crate::engine::{
    CanvasError, CanvasSnapshot, PlacementCanvas, PlacementEmitter, Template, TemplateError,
};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),
    #[error("Session limit of {0} reached")]
    CapacityReached(usize),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Session state returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    /// Number of placement updates emitted so far
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub canvas: CanvasSnapshot,
}

/// One product-creation form and its canvas
pub struct Session {
    id: Uuid,
    canvas: PlacementCanvas,
    revision: Arc<AtomicU64>,
    created_at: DateTime<Utc>,
    last_active: Instant,
}

impl Session {
    fn new(template: &Template) -> Self {
        let revision = Arc::new(AtomicU64::new(0));
        let counter = revision.clone();
        let emitter = PlacementEmitter::new(move |_rect: &CanonicalRect| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let mut canvas = PlacementCanvas::new(emitter);
        canvas.select_template(template.summary(), template.print_area());

        Session {
            id: Uuid::new_v4(),
            canvas,
            revision,
            created_at: Utc::now(),
            last_active: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Mutable canvas access; counts as activity
    pub fn canvas_mut(&mut self) -> &mut PlacementCanvas {
        self.last_active = Instant::now();
        &mut self.canvas
    }

    pub fn select_template(&mut self, template: &Template) {
        self.canvas_mut()
            .select_template(template.summary(), template.print_area());
    }

    pub fn submit(&mut self) -> Result<PlacementRecord, SessionError> {
        self.last_active = Instant::now();
        Ok(self.canvas.submit()?)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            revision: self.revision.load(Ordering::Relaxed),
            created_at: self.created_at,
            canvas: self.canvas.snapshot(),
        }
    }

    fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }
}

/// Concurrent map of live sessions
pub struct SessionStore {
    sessions: DashMap<Uuid, Arc<Mutex<Session>>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(settings: &SessionSettings) -> Self {
        SessionStore {
            sessions: DashMap::new(),
            max_sessions: settings.max_sessions,
            idle_timeout: Duration::from_secs(settings.idle_timeout_secs),
        }
    }

    /// Open a session on the given template
    pub fn create(&self, template: &Template) -> Result<SessionView, SessionError> {
        if self.sessions.len() >= self.max_sessions {
            return Err(SessionError::CapacityReached(self.max_sessions));
        }

        let session = Session::new(template);
        let view = session.view();
        self.sessions.insert(session.id(), Arc::new(Mutex::new(session)));

        info!(
            session_id = %view.session_id,
            template_id = %template.metadata.id,
            "Session created"
        );

        Ok(view)
    }

    /// Run `f` with exclusive access to a session
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, SessionError>,
    ) -> Result<R, SessionError> {
        // Clone the handle so the map shard is not locked while `f` runs
        let session = self
            .sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound(id))?;

        let mut guard = session.lock();
        f(&mut guard)
    }

    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| info!(session_id = %id, "Session closed"))
            .ok_or(SessionError::NotFound(id))
    }

    /// Drop sessions idle longer than the configured timeout
    pub fn purge_idle(&self) -> usize {
        let before = self.sessions.len();
        let timeout = self.idle_timeout;
        self.sessions
            .retain(|_, session| session.try_lock().map_or(true, |s| s.idle_for() < timeout));

        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            info!(purged, remaining = self.sessions.len(), "Expired idle sessions");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
