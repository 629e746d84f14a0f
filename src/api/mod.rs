//! API module - HTTP routes and handlers

pub mod handlers;
pub mod openapi;

use actix_web::{error, http::StatusCode, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::errors::error_response;
use crate::api::openapi::ApiDoc;

/// Malformed JSON bodies get the same error envelope as every other failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            error_response(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
        )
        .into()
    })
}

/// Configure all API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/templates")
                        .route("", web::get().to(handlers::templates::list_templates))
                        .route("/{template_id}", web::get().to(handlers::templates::get_template)),
                )
                .service(
                    web::scope("/sessions")
                        .route("", web::post().to(handlers::sessions::create_session))
                        .route("/{session_id}", web::get().to(handlers::sessions::get_session))
                        .route("/{session_id}", web::delete().to(handlers::sessions::delete_session))
                        .route("/{session_id}/template", web::put().to(handlers::sessions::select_template))
                        .route("/{session_id}/design", web::put().to(handlers::sessions::load_design))
                        .route("/{session_id}/design", web::delete().to(handlers::sessions::remove_design))
                        .route("/{session_id}/canvas-size", web::put().to(handlers::sessions::set_canvas_size))
                        .route("/{session_id}/gestures", web::post().to(handlers::gestures::apply_gesture))
                        .route("/{session_id}/submit", web::post().to(handlers::sessions::submit)),
                ),
        )
        .route("/health", web::get().to(handlers::health::health_check))
        // Swagger UI and OpenAPI spec
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Instant;

    use crate::config::Settings;
    use crate::engine::TemplateManager;
    use crate::session::SessionStore;
    use crate::AppState;

    async fn app_state() -> web::Data<AppState> {
        let dir = tempfile::tempdir().unwrap();
        for id in ["white_tee_front", "black_hoodie_back"] {
            let path = dir.path().join(id);
            std::fs::create_dir_all(&path).unwrap();
            std::fs::write(
                path.join("metadata.json"),
                json!({
                    "id": id,
                    "name": "Heavyweight Tee",
                    "product_type": "tshirt",
                    "placement": "front",
                    "mockup_url": format!("https://cdn.example.com/{}.png", id),
                    "print_area": { "x": 1000, "y": 800, "width": 1000, "height": 1300 }
                })
                .to_string(),
            )
            .unwrap();
        }

        let template_manager = Arc::new(TemplateManager::new(dir.path()));
        template_manager.load_all().await.unwrap();

        let settings = Settings::default();
        let sessions = Arc::new(SessionStore::new(&settings.sessions));
        web::Data::new(AppState {
            settings,
            template_manager,
            sessions,
            started_at: Instant::now(),
        })
    }

    macro_rules! call_json {
        ($app:expr, $req:expr) => {{
            let resp = test::call_service(&$app, $req.to_request()).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    #[actix_web::test]
    async fn test_placement_flow() {
        let app = test::init_service(
            App::new().app_data(app_state().await).configure(configure_routes),
        )
        .await;

        let (status, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/sessions")
                .set_json(json!({ "template_id": "white_tee_front" }))
        );
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["session_id"].as_str().unwrap().to_string();

        let (status, body) = call_json!(
            app,
            test::TestRequest::put()
                .uri(&format!("/api/v1/sessions/{}/canvas-size", id))
                .set_json(json!({ "w": 320.0, "h": 427.0 }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["canvas"]["adjusted_print_area"]["y"], 840.0);

        let (status, body) = call_json!(
            app,
            test::TestRequest::put()
                .uri(&format!("/api/v1/sessions/{}/design", id))
                .set_json(json!({ "url": "https://cdn.example.com/art.png", "file_name": "art.png" }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["canvas"]["placement"],
            json!({ "x": 1250.0, "y": 1165.0, "width": 500.0, "height": 650.0 })
        );
        assert_eq!(body["data"]["revision"], 1);

        for event in [
            json!({ "event": "drag_start" }),
            json!({ "event": "move", "mx": 32.0, "my": 0.0 }),
            json!({ "event": "end" }),
            json!({ "event": "resize_start", "handle": "right" }),
            json!({ "event": "move", "mx": -320.0, "my": 0.0 }),
            json!({ "event": "end" }),
        ] {
            let (status, _) = call_json!(
                app,
                test::TestRequest::post()
                    .uri(&format!("/api/v1/sessions/{}/gestures", id))
                    .set_json(event)
            );
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = call_json!(
            app,
            test::TestRequest::post().uri(&format!("/api/v1/sessions/{}/submit", id))
        );
        assert_eq!(status, StatusCode::OK);
        let record = &body["data"];
        assert_eq!(
            record["placement"],
            json!({ "x": 1500.0, "y": 1165.0, "width": 50.0, "height": 650.0 })
        );
        assert_eq!(record["print_area"]["y"], 840.0);
        assert_eq!(record["original_print_area"]["y"], 800.0);
        assert_eq!(
            record["fulfillment"],
            json!({
                "area_width": 1000,
                "area_height": 1300,
                "width": 50,
                "height": 650,
                "top": 325,
                "left": 500
            })
        );
        assert_eq!(record["template"]["id"], "white_tee_front");
    }

    #[actix_web::test]
    async fn test_gesture_errors() {
        let app = test::init_service(
            App::new().app_data(app_state().await).configure(configure_routes),
        )
        .await;

        let (_, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/sessions")
                .set_json(json!({ "template_id": "black_hoodie_back" }))
        );
        let id = body["data"]["session_id"].as_str().unwrap().to_string();
        let gestures = format!("/api/v1/sessions/{}/gestures", id);

        let (status, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri(&gestures)
                .set_json(json!({ "event": "drag_start" }))
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "NO_DESIGN");

        call_json!(
            app,
            test::TestRequest::put()
                .uri(&format!("/api/v1/sessions/{}/design", id))
                .set_json(json!({ "url": "https://cdn.example.com/art.png" }))
        );

        let (status, _) = call_json!(
            app,
            test::TestRequest::post()
                .uri(&gestures)
                .set_json(json!({ "event": "resize_start", "handle": "top_left" }))
        );
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri(&gestures)
                .set_json(json!({ "event": "drag_start" }))
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "GESTURE_IN_PROGRESS");

        let (status, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri(&gestures)
                .set_json(json!({ "event": "spin" }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    }

    #[actix_web::test]
    async fn test_not_found_errors() {
        let app = test::init_service(
            App::new().app_data(app_state().await).configure(configure_routes),
        )
        .await;

        let (status, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/sessions")
                .set_json(json!({ "template_id": "no_such_template" }))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "TEMPLATE_NOT_FOUND");

        let (status, body) = call_json!(
            app,
            test::TestRequest::get().uri(&format!("/api/v1/sessions/{}", uuid::Uuid::new_v4()))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "SESSION_NOT_FOUND");

        let (status, body) = call_json!(
            app,
            test::TestRequest::get().uri("/api/v1/templates")
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
    }

    #[actix_web::test]
    async fn test_invalid_design_reference() {
        let app = test::init_service(
            App::new().app_data(app_state().await).configure(configure_routes),
        )
        .await;

        let (_, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/sessions")
                .set_json(json!({ "template_id": "white_tee_front" }))
        );
        let id = body["data"]["session_id"].as_str().unwrap().to_string();

        let (status, body) = call_json!(
            app,
            test::TestRequest::put()
                .uri(&format!("/api/v1/sessions/{}/design", id))
                .set_json(json!({ "url": "ftp://example.com/art.png" }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_DESIGN");

        let (status, body) = call_json!(
            app,
            test::TestRequest::post().uri(&format!("/api/v1/sessions/{}/submit", id))
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "NO_DESIGN");
    }
}
