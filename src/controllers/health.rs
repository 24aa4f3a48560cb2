use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

use crate::domain::tts::TtsService;

pub struct HealthState {
    pub tts_service: Arc<TtsService>,
    pub provider: &'static str,
    pub started_at: DateTime<Utc>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let cache = state.tts_service.cache_stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "tts": {
                "provider": state.provider,
                "status": "available"
            },
            "cache": {
                "entries": cache.entry_count,
                "bytes": cache.weighted_bytes
            },
            "started_at": state.started_at,
            "uptime_secs": uptime_secs
        })),
    )
}
