//! Canvas session endpoints
//!
//! A session is one product-creation form: a selected template, an optional
//! design and its placement. Every mutation answers with the session view.

use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DesignImage, PlacementRecord, RenderedCanvasSize};
use crate::engine::CanvasError;
use crate::session::{SessionError, SessionView};
use crate::AppState;

use super::errors::{error_response, ErrorResponse};

/// Request body for opening a session
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// Template ID (e.g., "white_tee_front")
    pub template_id: String,
}

/// Request body for switching templates
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectTemplateRequest {
    pub template_id: String,
}

/// Request body for loading a design image
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoadDesignRequest {
    /// Loadable image URL
    pub url: String,
    /// Original file name of the upload
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Request body reporting the rendered canvas size in pixels
#[derive(Debug, Deserialize, ToSchema)]
pub struct CanvasSizeRequest {
    pub w: f64,
    pub h: f64,
}

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
    pub data: SessionView,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
    pub data: PlacementRecord,
}

pub(super) fn session_response(result: Result<SessionView, SessionError>) -> HttpResponse {
    match result {
        Ok(view) => HttpResponse::Ok().json(SessionResponse {
            success: true,
            data: view,
        }),
        Err(e) => e.into(),
    }
}

/// POST /api/v1/sessions - Open a canvas session on a template
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = SessionResponse),
        (status = 404, description = "Template not found", body = ErrorResponse),
        (status = 503, description = "Session limit reached", body = ErrorResponse)
    )
)]
pub async fn create_session(
    state: web::Data<AppState>,
    body: web::Json<CreateSessionRequest>,
) -> HttpResponse {
    let result = state
        .template_manager
        .require(&body.template_id)
        .map_err(SessionError::from)
        .and_then(|template| state.sessions.create(&template));

    match result {
        Ok(view) => HttpResponse::Created().json(SessionResponse {
            success: true,
            data: view,
        }),
        Err(e) => e.into(),
    }
}

/// GET /api/v1/sessions/{session_id} - Current canvas state
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{session_id}",
    tag = "sessions",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn get_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();
    session_response(state.sessions.with_session(id, |session| Ok(session.view())))
}

/// DELETE /api/v1/sessions/{session_id} - Close a session
#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{session_id}",
    tag = "sessions",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn delete_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.sessions.remove(path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.into(),
    }
}

/// PUT /api/v1/sessions/{session_id}/template - Switch the product template
#[utoipa::path(
    put,
    path = "/api/v1/sessions/{session_id}/template",
    tag = "sessions",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    request_body = SelectTemplateRequest,
    responses(
        (status = 200, description = "Template switched; design cleared", body = SessionResponse),
        (status = 404, description = "Session or template not found", body = ErrorResponse)
    )
)]
pub async fn select_template(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SelectTemplateRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = state
        .template_manager
        .require(&body.template_id)
        .map_err(SessionError::from)
        .and_then(|template| {
            state.sessions.with_session(id, |session| {
                session.select_template(&template);
                Ok(session.view())
            })
        });

    session_response(result)
}

/// PUT /api/v1/sessions/{session_id}/design - Load a design image
#[utoipa::path(
    put,
    path = "/api/v1/sessions/{session_id}/design",
    tag = "sessions",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    request_body = LoadDesignRequest,
    responses(
        (status = 200, description = "Design loaded at the default placement", body = SessionResponse),
        (status = 400, description = "Invalid design reference", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn load_design(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<LoadDesignRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    let body = body.into_inner();

    let result = state.sessions.with_session(id, |session| {
        let design = DesignImage::parse(&body.url, body.file_name)
            .map_err(CanvasError::InvalidDesignReference)?;
        let placement = session.canvas_mut().load_design(design)?;
        info!(
            session_id = %id,
            x = placement.position.x,
            y = placement.position.y,
            "Design loaded"
        );
        Ok(session.view())
    });

    session_response(result)
}

/// DELETE /api/v1/sessions/{session_id}/design - Remove the design
#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{session_id}/design",
    tag = "sessions",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Design removed", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn remove_design(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();
    session_response(state.sessions.with_session(id, |session| {
        session.canvas_mut().remove_design();
        Ok(session.view())
    }))
}

/// PUT /api/v1/sessions/{session_id}/canvas-size - Report the rendered canvas size
#[utoipa::path(
    put,
    path = "/api/v1/sessions/{session_id}/canvas-size",
    tag = "sessions",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    request_body = CanvasSizeRequest,
    responses(
        (status = 200, description = "Print area recomputed", body = SessionResponse),
        (status = 400, description = "Negative canvas size", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn set_canvas_size(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CanvasSizeRequest>,
) -> HttpResponse {
    if body.w < 0.0 || body.h < 0.0 {
        return error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_CANVAS_SIZE",
            format!("Canvas size must not be negative, got {}x{}", body.w, body.h),
        );
    }

    let id = path.into_inner();
    let rendered = RenderedCanvasSize::new(body.w, body.h);
    session_response(state.sessions.with_session(id, |session| {
        session.canvas_mut().canvas_resized(rendered);
        Ok(session.view())
    }))
}

/// POST /api/v1/sessions/{session_id}/submit - Package the placement record
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{session_id}/submit",
    tag = "sessions",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Placement record for product creation", body = SubmitResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "No design placed", body = ErrorResponse)
    )
)]
pub async fn submit(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();

    match state.sessions.with_session(id, |session| session.submit()) {
        Ok(record) => {
            info!(
                session_id = %id,
                template_id = %record.template.id,
                checksum = %record.checksum,
                "Placement submitted"
            );
            HttpResponse::Ok().json(SubmitResponse {
                success: true,
                data: record,
            })
        }
        Err(e) => e.into(),
    }
}
