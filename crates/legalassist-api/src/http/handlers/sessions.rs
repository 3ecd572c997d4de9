//! Session listing handler.
//!
//! Endpoint:
//! - GET /api/sessions - Ids of all sessions that hold turns

use axum::extract::State;
use axum::Json;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/sessions
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let ids = state.chat_service.session_ids().await?;
    Ok(Json(ids))
}
