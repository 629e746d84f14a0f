//! Pointer gesture endpoint
//!
//! Clients forward pointer events for the design body and the resize
//! handles. `move` carries the cumulative movement since the gesture began.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::PixelDelta;
use crate::engine::ResizeHandle;
use crate::session::SessionView;
use crate::AppState;

use super::errors::ErrorResponse;

/// A single pointer event
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Pointer down on the design body
    DragStart,
    /// Pointer down on a resize handle
    ResizeStart { handle: ResizeHandle },
    /// Pointer moved, in pixels since pointer down
    Move { mx: f64, my: f64 },
    /// Pointer released
    End,
}

#[derive(Serialize, ToSchema)]
pub struct GestureResponse {
    pub success: bool,
    /// Whether this event changed the placement
    pub changed: bool,
    pub data: SessionView,
}

/// POST /api/v1/sessions/{session_id}/gestures - Apply a pointer event
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{session_id}/gestures",
    tag = "gestures",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    request_body = GestureEvent,
    responses(
        (status = 200, description = "Event applied", body = GestureResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "No design, or another gesture is active", body = ErrorResponse)
    )
)]
pub async fn apply_gesture(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<GestureEvent>,
) -> HttpResponse {
    let id = path.into_inner();
    let event = body.into_inner();

    let result = state.sessions.with_session(id, |session| {
        let canvas = session.canvas_mut();
        let changed = match event {
            GestureEvent::DragStart => {
                canvas.begin_drag()?;
                false
            }
            GestureEvent::ResizeStart { handle } => {
                canvas.begin_resize(handle)?;
                false
            }
            GestureEvent::Move { mx, my } => canvas.pointer_moved(PixelDelta::new(mx, my)),
            GestureEvent::End => {
                canvas.end_gesture();
                false
            }
        };
        Ok((changed, session.view()))
    });

    match result {
        Ok((changed, view)) => HttpResponse::Ok().json(GestureResponse {
            success: true,
            changed,
            data: view,
        }),
        Err(e) => e.into(),
    }
}
