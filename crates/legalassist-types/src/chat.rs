//! Chat turn types for LegalAssist.
//!
//! A turn is one message in a conversation, authored either by the end user
//! or by the response generator. Turns are grouped by an opaque,
//! client-chosen session identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::MessageRole;

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl From<TurnRole> for MessageRole {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => MessageRole::User,
            TurnRole::Assistant => MessageRole::Assistant,
        }
    }
}

/// A persisted chat turn.
///
/// `id` is unique across all sessions for the lifetime of the store and is
/// assigned together with `created_at` when the turn is appended. Turns are
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub id: u64,
    pub session_id: String,
    pub content: String,
    pub role: TurnRole,
    pub category: Option<String>,
    pub sources: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// A turn that has not been stored yet (no id, no timestamp).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTurn {
    pub session_id: String,
    pub content: String,
    pub role: TurnRole,
    pub category: Option<String>,
    pub sources: Option<Vec<String>>,
}

impl NewTurn {
    /// A user turn. User turns never carry a category or sources.
    pub fn user(session_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            content: content.into(),
            role: TurnRole::User,
            category: None,
            sources: None,
        }
    }

    /// An assistant turn carrying the generator's classification and citations.
    pub fn assistant(
        session_id: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        sources: Vec<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            content: content.into(),
            role: TurnRole::Assistant,
            category: Some(category.into()),
            sources: Some(sources),
        }
    }

    /// Attach an id and creation time, producing the stored form.
    pub fn into_turn(self, id: u64, created_at: DateTime<Utc>) -> ChatTurn {
        ChatTurn {
            id,
            session_id: self.session_id,
            content: self.content,
            role: self.role,
            category: self.category,
            sources: self.sources,
            created_at,
        }
    }
}
