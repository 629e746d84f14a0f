//! OpenAPI 3.0 specification definition

use utoipa::OpenApi;

use crate::api::handlers::{
    errors::{ApiError, ErrorResponse},
    gestures::{GestureEvent, GestureResponse},
    health::HealthResponse,
    sessions::{
        CanvasSizeRequest, CreateSessionRequest, LoadDesignRequest, SelectTemplateRequest,
        SessionResponse, SubmitResponse,
    },
    templates::{TemplateResponse, TemplatesListResponse},
};
use crate::domain::{
    CanonicalRect, DesignImage, DesignPlacement, FulfillmentPosition, PercentRect,
    PlacementRecord, PlacementType, Position, RenderedCanvasSize, Size, TemplateSummary,
};
use crate::engine::{CanvasSnapshot, GestureKind, PixelRect, ResizeHandle, TemplateMetadata};
use crate::session::SessionView;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Placement Canvas API",
        version = "1.0.0",
        description = "Design placement on print-on-demand product templates",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/", description = "Current server")
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "templates", description = "Product template catalogue"),
        (name = "sessions", description = "Canvas sessions and placement submission"),
        (name = "gestures", description = "Drag and resize pointer events")
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::templates::list_templates,
        crate::api::handlers::templates::get_template,
        crate::api::handlers::sessions::create_session,
        crate::api::handlers::sessions::get_session,
        crate::api::handlers::sessions::delete_session,
        crate::api::handlers::sessions::select_template,
        crate::api::handlers::sessions::load_design,
        crate::api::handlers::sessions::remove_design,
        crate::api::handlers::sessions::set_canvas_size,
        crate::api::handlers::sessions::submit,
        crate::api::handlers::gestures::apply_gesture,
    ),
    components(
        schemas(
            // System
            HealthResponse,
            ErrorResponse,
            ApiError,
            // Templates
            TemplatesListResponse,
            TemplateResponse,
            TemplateMetadata,
            TemplateSummary,
            PlacementType,
            // Sessions
            CreateSessionRequest,
            SelectTemplateRequest,
            LoadDesignRequest,
            CanvasSizeRequest,
            SessionResponse,
            SessionView,
            CanvasSnapshot,
            SubmitResponse,
            PlacementRecord,
            FulfillmentPosition,
            DesignImage,
            // Gestures
            GestureEvent,
            GestureResponse,
            GestureKind,
            ResizeHandle,
            // Geometry
            CanonicalRect,
            DesignPlacement,
            PercentRect,
            PixelRect,
            Position,
            Size,
            RenderedCanvasSize,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_session_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/sessions/{session_id}/gestures"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/sessions/{session_id}/submit"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
