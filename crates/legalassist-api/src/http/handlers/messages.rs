//! Message (turn) handlers.
//!
//! Endpoints:
//! - GET    /api/messages/{sessionId} - All turns of a session, oldest first
//! - DELETE /api/messages/{id}        - Delete one turn by numeric id

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use legalassist_types::chat::ChatTurn;

use crate::http::error::AppError;
use crate::state::AppState;

/// Parse a turn id from a path parameter, returning a 400 on bad input.
fn parse_turn_id(s: &str) -> Result<u64, AppError> {
    s.trim()
        .parse::<u64>()
        .map_err(|_| AppError::Validation(format!("Invalid message ID: {s}")))
}

/// GET /api/messages/{sessionId}
pub async fn list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatTurn>>, AppError> {
    let turns = state.chat_service.messages(&session_id).await?;
    Ok(Json(turns))
}

/// DELETE /api/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_turn_id(&id)?;
    state.chat_service.delete_turn(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
