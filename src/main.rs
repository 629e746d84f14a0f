//! Placement Canvas
//!
//! Headless design-placement service for print-on-demand product creation.
//! Operators position and resize artwork on a product mockup, constrained to
//! the supplier's print area, and submit a resolution-independent placement
//! record for fulfillment.

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_actix_web::TracingLogger;

mod api;
mod config;
mod domain;
mod engine;
mod session;

use crate::config::Settings;
use crate::engine::TemplateManager;
use crate::session::SessionStore;

/// How often idle sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Settings,
    pub template_manager: Arc<TemplateManager>,
    pub sessions: Arc<SessionStore>,
    pub started_at: Instant,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("placement_canvas=info".parse()?)
                .add_directive("actix_web=info".parse()?),
        )
        .json()
        .init();

    let settings = Settings::load().context("Failed to load configuration")?;
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    info!(
        "Starting Placement Canvas v{} on {}",
        env!("CARGO_PKG_VERSION"),
        bind_addr
    );

    // Load all templates into memory at startup
    let template_manager = Arc::new(TemplateManager::new(&settings.templates.path));
    template_manager
        .load_all()
        .await
        .context("Failed to load templates")?;
    info!("Loaded {} templates", template_manager.template_count());

    let sessions = Arc::new(SessionStore::new(&settings.sessions));

    let sweeper = sessions.clone();
    actix_rt::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            sweeper.purge_idle();
        }
    });

    let workers = settings.worker_count();
    let app_state = web::Data::new(AppState {
        settings,
        template_manager,
        sessions,
        started_at: Instant::now(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Service", "placement-canvas"))
                    .add(("X-Version", env!("CARGO_PKG_VERSION"))),
            )
            .configure(api::configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
