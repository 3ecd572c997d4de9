//! Chat submission handler.
//!
//! Endpoint:
//! - POST /api/chat - Submit a user message and receive the assistant turn

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use legalassist_core::chat::service::SubmitMessage;
use legalassist_types::chat::ChatTurn;

use crate::http::error::AppError;
use crate::http::extractors::json::AppJson;
use crate::state::AppState;

/// Request body for POST /api/chat.
///
/// Missing `message`/`sessionId` deserialize as empty strings so the
/// service reports them with its own validation messages.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<ChatRequest> for SubmitMessage {
    fn from(req: ChatRequest) -> Self {
        SubmitMessage {
            message: req.message,
            session_id: req.session_id,
            category: req.category,
        }
    }
}

/// POST /api/chat - Store the question, generate a reply, return the reply turn.
pub async fn submit_chat(
    State(state): State<AppState>,
    AppJson(body): AppJson<ChatRequest>,
) -> Result<Json<ChatTurn>, AppError> {
    let turn = state.chat_service.submit(body.into()).await?;
    Ok(Json(turn))
}
