//! In-memory implementation of [`TurnRepository`].
//!
//! Sessions live in a `DashMap<String, Vec<ChatTurn>>`. A second map indexes
//! turn id -> session id so delete-by-id does not scan every session.
//! Ids are drawn while the session's entry is held, so ids ascend within
//! each session list and a binary search finds a turn by id.
//!
//! All guards are released before returning; none is held across an
//! `.await`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use legalassist_core::chat::repository::TurnRepository;
use legalassist_types::chat::{ChatTurn, NewTurn};
use legalassist_types::error::RepositoryError;

#[derive(Debug, Default)]
struct Inner {
    sessions: DashMap<String, Vec<ChatTurn>>,
    index: DashMap<u64, String>,
    next_id: AtomicU64,
}

/// Concurrent in-memory turn store.
///
/// Cloning produces a shared view of the same underlying data (backed by `Arc`).
#[derive(Debug, Clone, Default)]
pub struct InMemoryTurnRepository {
    inner: Arc<Inner>,
}

impl InMemoryTurnRepository {
    /// Create an empty store. The first id handed out is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn append_turn(&self, turn: NewTurn) -> ChatTurn {
        let stored = {
            let mut turns = self
                .inner
                .sessions
                .entry(turn.session_id.clone())
                .or_default();
            let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            let stored = turn.into_turn(id, Utc::now());
            turns.push(stored.clone());
            stored
        };
        self.inner.index.insert(stored.id, stored.session_id.clone());
        stored
    }

    fn remove_turn(&self, id: u64) -> bool {
        let Some((_, session_id)) = self.inner.index.remove(&id) else {
            return false;
        };

        let removed = match self.inner.sessions.get_mut(&session_id) {
            Some(mut turns) => match turns.binary_search_by_key(&id, |t| t.id) {
                Ok(pos) => {
                    turns.remove(pos);
                    true
                }
                Err(_) => false,
            },
            None => false,
        };

        // An emptied session must look like one that never existed.
        self.inner
            .sessions
            .remove_if(&session_id, |_, turns| turns.is_empty());

        removed
    }

    fn turns_of(&self, session_id: &str) -> Vec<ChatTurn> {
        self.inner
            .sessions
            .get(session_id)
            .map(|turns| turns.value().clone())
            .unwrap_or_default()
    }

    fn recent_turns_of(&self, session_id: &str, limit: usize) -> Vec<ChatTurn> {
        self.inner
            .sessions
            .get(session_id)
            .map(|turns| {
                let start = turns.len().saturating_sub(limit);
                turns[start..].to_vec()
            })
            .unwrap_or_default()
    }

    fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .inner
            .sessions
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }
}

impl TurnRepository for InMemoryTurnRepository {
    async fn append(&self, turn: NewTurn) -> Result<ChatTurn, RepositoryError> {
        Ok(self.append_turn(turn))
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, RepositoryError> {
        Ok(self.turns_of(session_id))
    }

    async fn list_recent(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatTurn>, RepositoryError> {
        Ok(self.recent_turns_of(session_id, limit))
    }

    async fn delete_by_id(&self, id: u64) -> Result<bool, RepositoryError> {
        Ok(self.remove_turn(id))
    }

    async fn list_session_ids(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.session_ids())
    }

    async fn count_turns(&self) -> Result<u64, RepositoryError> {
        Ok(self.inner.index.len() as u64)
    }
}
