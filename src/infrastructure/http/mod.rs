use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    health::{self, HealthState},
    page,
    tts::TtsController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::request_id_middleware;

/// Room for multipart framing and the other form fields around the file
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    tts_controller: Arc<TtsController>,
    health_state: Arc<HealthState>,
) -> Router {
    // Conversion routes
    let tts_routes = Router::new()
        .route("/api/tts/convert", post(TtsController::convert))
        .route("/api/tts/synthesize", post(TtsController::synthesize))
        .route("/api/languages", get(TtsController::languages))
        .with_state(tts_controller)
        .layer(DefaultBodyLimit::max(body_limit(config)));

    // Health routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state);

    let app = Router::new()
        .route("/", get(page::index))
        .merge(tts_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        );

    if config.is_development() {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Largest request body accepted on the conversion routes
fn body_limit(config: &Config) -> usize {
    config.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES)
}

/// Start the HTTP server
pub async fn start_http_server(config: Arc<Config>, app: Router) -> anyhow::Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
