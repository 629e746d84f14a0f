//! Template catalogue endpoints

use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::engine::TemplateMetadata;
use crate::AppState;

use super::errors::{error_response, ErrorResponse};

/// Response for listing templates
#[derive(Serialize, ToSchema)]
pub struct TemplatesListResponse {
    pub success: bool,
    pub data: Vec<TemplateMetadata>,
    pub count: usize,
}

/// Response for a single template
#[derive(Serialize, ToSchema)]
pub struct TemplateResponse {
    pub success: bool,
    pub data: TemplateMetadata,
}

/// GET /api/v1/templates - List all loaded templates
#[utoipa::path(
    get,
    path = "/api/v1/templates",
    tag = "templates",
    responses(
        (status = 200, description = "List of all loaded templates", body = TemplatesListResponse)
    )
)]
pub async fn list_templates(state: web::Data<AppState>) -> HttpResponse {
    let data = state.template_manager.list();
    let count = data.len();
    info!(count, "Listed templates");

    HttpResponse::Ok().json(TemplatesListResponse {
        success: true,
        data,
        count,
    })
}

/// GET /api/v1/templates/{template_id} - Get a template's print area and mockup
#[utoipa::path(
    get,
    path = "/api/v1/templates/{template_id}",
    tag = "templates",
    params(
        ("template_id" = String, Path, description = "Template identifier")
    ),
    responses(
        (status = 200, description = "Template details", body = TemplateResponse),
        (status = 404, description = "Template not found", body = ErrorResponse)
    )
)]
pub async fn get_template(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let template_id = path.into_inner();

    match state.template_manager.get(&template_id) {
        Some(template) => HttpResponse::Ok().json(TemplateResponse {
            success: true,
            data: template.metadata.clone(),
        }),
        None => error_response(
            StatusCode::NOT_FOUND,
            "TEMPLATE_NOT_FOUND",
            format!("Template '{}' does not exist", template_id),
        ),
    }
}
