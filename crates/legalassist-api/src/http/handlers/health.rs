//! GET /health - Liveness plus store counters.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub turns: u64,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let stats = state.chat_service.stats().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: stats.sessions,
        turns: stats.turns,
    }))
}
