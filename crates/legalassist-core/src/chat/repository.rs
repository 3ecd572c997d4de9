//! TurnRepository trait definition.
//!
//! The session store: an append-only list of turns per session plus
//! delete-by-id. Implementations live in legalassist-infra (e.g.,
//! `InMemoryTurnRepository`); swapping in a persistent backend must not
//! touch the orchestrator.

use legalassist_types::chat::{ChatTurn, NewTurn};
use legalassist_types::error::RepositoryError;

/// Repository trait for chat turn persistence.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait TurnRepository: Send + Sync {
    /// Assign a fresh id and creation timestamp, append the turn to its
    /// session (creating the session if absent), and return the stored turn.
    fn append(
        &self,
        turn: NewTurn,
    ) -> impl std::future::Future<Output = Result<ChatTurn, RepositoryError>> + Send;

    /// All turns of a session in insertion order; empty for an unknown session.
    fn list_by_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, RepositoryError>> + Send;

    /// The last `limit` turns of a session, oldest first.
    fn list_recent(
        &self,
        session_id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, RepositoryError>> + Send;

    /// Remove the turn with this id. Returns whether such a turn existed.
    fn delete_by_id(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Identifiers of every session that currently holds at least one turn.
    ///
    /// Enumeration order is unspecified.
    fn list_session_ids(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Total number of turns across all sessions.
    fn count_turns(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
