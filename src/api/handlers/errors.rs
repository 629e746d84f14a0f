//! Shared error responses

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::engine::{CanvasError, TemplateError};
use crate::session::SessionError;

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ApiError,
}

#[derive(Serialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        success: false,
        error: ApiError {
            code: code.to_string(),
            message: message.into(),
        },
    })
}

/// Status and error code for a template error
fn template_status(e: &TemplateError) -> (StatusCode, &'static str) {
    match e {
        TemplateError::NotFound(_) => (StatusCode::NOT_FOUND, "TEMPLATE_NOT_FOUND"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR"),
    }
}

/// Status and error code for a canvas error
fn canvas_status(e: &CanvasError) -> (StatusCode, &'static str) {
    match e {
        CanvasError::NoTemplate => (StatusCode::CONFLICT, "NO_TEMPLATE"),
        CanvasError::NoDesign => (StatusCode::CONFLICT, "NO_DESIGN"),
        CanvasError::GestureInProgress(_) => (StatusCode::CONFLICT, "GESTURE_IN_PROGRESS"),
        CanvasError::InvalidDesignReference(_) => (StatusCode::BAD_REQUEST, "INVALID_DESIGN"),
    }
}

impl From<SessionError> for HttpResponse {
    fn from(e: SessionError) -> Self {
        let (status, code) = match &e {
            SessionError::NotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            SessionError::CapacityReached(_) => (StatusCode::SERVICE_UNAVAILABLE, "SESSION_LIMIT"),
            SessionError::Template(inner) => template_status(inner),
            SessionError::Canvas(inner) => canvas_status(inner),
        };

        warn!(error = %e, code, "Session request failed");
        error_response(status, code, e.to_string())
    }
}
