//! Chat service orchestrating a question/answer exchange.
//!
//! `ChatService` validates a submission, stores the user turn, gathers the
//! recent history, asks the generator for a reply, and stores the reply as
//! an assistant turn. A generator failure never reaches the caller: it is
//! replaced by a fixed fallback reply so every stored user turn gets an
//! assistant turn.
//!
//! The user turn is stored before the generator runs. A crash in between
//! leaves a user turn without a reply; nothing is rolled back. Two
//! submissions to the same session are not serialized against each other.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use legalassist_types::category::CategoryFilter;
use legalassist_types::chat::{ChatTurn, NewTurn};
use legalassist_types::config::ChatSettings;
use legalassist_types::error::RepositoryError;
use legalassist_types::llm::Message;

use crate::chat::generator::{GeneratedReply, GenerationError, ReplyGenerator, ReplyRequest};
use crate::chat::repository::TurnRepository;

/// Reply text stored when the generator fails.
pub const FALLBACK_REPLY_CONTENT: &str =
    "I'm sorry, I encountered an error processing your request. Please try again later.";

/// Category stored on a fallback reply.
pub const FALLBACK_REPLY_CATEGORY: &str = "error";

/// Source label stored on a fallback reply.
pub const FALLBACK_REPLY_SOURCE: &str = "System error";

/// Errors surfaced by the chat service.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The submission was rejected before anything was stored.
    #[error("{0}")]
    Validation(String),

    #[error("turn {0} not found")]
    NotFound(u64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// An incoming user message.
#[derive(Debug, Clone)]
pub struct SubmitMessage {
    pub message: String,
    pub session_id: String,
    /// One of the category wire names, or "all".
    pub category: Option<String>,
}

/// Store-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    pub sessions: usize,
    pub turns: u64,
}

/// The degraded reply used when generation fails.
pub fn fallback_reply() -> GeneratedReply {
    GeneratedReply {
        content: FALLBACK_REPLY_CONTENT.to_string(),
        category: FALLBACK_REPLY_CATEGORY.to_string(),
        sources: vec![FALLBACK_REPLY_SOURCE.to_string()],
    }
}

/// Orchestrates chat submissions over a turn repository and a generator.
///
/// Generic over `TurnRepository` and `ReplyGenerator` to maintain clean
/// architecture (legalassist-core never depends on legalassist-infra).
pub struct ChatService<R: TurnRepository, G: ReplyGenerator> {
    repo: R,
    generator: G,
    history_window: usize,
    generator_timeout: Duration,
}

impl<R: TurnRepository, G: ReplyGenerator> ChatService<R, G> {
    pub fn new(repo: R, generator: G, settings: &ChatSettings) -> Self {
        Self {
            repo,
            generator,
            history_window: settings.history_window,
            generator_timeout: settings.generator_timeout(),
        }
    }

    /// Access the turn repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Submit a user message and return the stored assistant turn.
    ///
    /// Produces exactly one user turn and one assistant turn, or (on a
    /// validation error) no turns at all.
    pub async fn submit(&self, submission: SubmitMessage) -> Result<ChatTurn, ChatError> {
        let category = validate(&submission)?;
        let SubmitMessage {
            message,
            session_id,
            ..
        } = submission;

        let user_turn = self
            .repo
            .append(NewTurn::user(session_id.clone(), message.clone()))
            .await?;
        info!(session_id = %session_id, turn_id = user_turn.id, %category, "User turn stored");

        let history = match self.repo.list_recent(&session_id, self.history_window).await {
            Ok(turns) => turns
                .into_iter()
                .map(|t| Message::new(t.role.into(), t.content))
                .collect(),
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Failed to load history, continuing without it");
                Vec::new()
            }
        };

        let request = ReplyRequest {
            utterance: message,
            category,
            history,
        };

        let start = Instant::now();
        let reply = match self.generate(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Generator failed, storing fallback reply");
                fallback_reply()
            }
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let assistant_turn = self
            .repo
            .append(NewTurn::assistant(
                session_id.clone(),
                reply.content,
                reply.category,
                reply.sources,
            ))
            .await?;
        info!(
            session_id = %session_id,
            turn_id = assistant_turn.id,
            category = assistant_turn.category.as_deref().unwrap_or_default(),
            elapsed_ms,
            "Assistant turn stored"
        );

        Ok(assistant_turn)
    }

    /// All turns of a session in insertion order.
    pub async fn messages(&self, session_id: &str) -> Result<Vec<ChatTurn>, ChatError> {
        Ok(self.repo.list_by_session(session_id).await?)
    }

    /// Identifiers of all sessions that hold turns.
    pub async fn session_ids(&self) -> Result<Vec<String>, ChatError> {
        Ok(self.repo.list_session_ids().await?)
    }

    /// Delete a single turn by id.
    pub async fn delete_turn(&self, id: u64) -> Result<(), ChatError> {
        if self.repo.delete_by_id(id).await? {
            info!(turn_id = id, "Turn deleted");
            Ok(())
        } else {
            Err(ChatError::NotFound(id))
        }
    }

    pub async fn stats(&self) -> Result<ChatStats, ChatError> {
        let sessions = self.repo.list_session_ids().await?.len();
        let turns = self.repo.count_turns().await?;
        Ok(ChatStats { sessions, turns })
    }

    async fn generate(&self, request: &ReplyRequest) -> Result<GeneratedReply, GenerationError> {
        match tokio::time::timeout(self.generator_timeout, self.generator.generate(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.generator_timeout)),
        }
    }
}

/// Check a submission before anything is stored.
fn validate(submission: &SubmitMessage) -> Result<CategoryFilter, ChatError> {
    if submission.message.trim().is_empty() {
        return Err(ChatError::Validation("Message is required".to_string()));
    }
    if submission.session_id.is_empty() {
        return Err(ChatError::Validation("Session ID is required".to_string()));
    }
    match submission.category.as_deref() {
        None => Ok(CategoryFilter::All),
        Some(raw) => raw.parse().map_err(ChatError::Validation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use legalassist_types::category::Category;
    use legalassist_types::chat::TurnRole;
    use legalassist_types::llm::{LlmError, MessageRole};

    /// Vec-backed repository for exercising the service in isolation.
    #[derive(Default)]
    struct MockTurnRepository {
        turns: Mutex<Vec<ChatTurn>>,
        next_id: AtomicU64,
    }

    impl MockTurnRepository {
        fn len(&self) -> usize {
            self.turns.lock().unwrap().len()
        }
    }

    impl TurnRepository for MockTurnRepository {
        async fn append(&self, turn: NewTurn) -> Result<ChatTurn, RepositoryError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let stored = turn.into_turn(id, epoch());
            self.turns.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn list_by_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, RepositoryError> {
            Ok(self
                .turns
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.session_id == session_id)
                .cloned()
                .collect())
        }

        async fn list_recent(
            &self,
            session_id: &str,
            limit: usize,
        ) -> Result<Vec<ChatTurn>, RepositoryError> {
            let all = self.list_by_session(session_id).await?;
            let skip = all.len().saturating_sub(limit);
            Ok(all.into_iter().skip(skip).collect())
        }

        async fn delete_by_id(&self, id: u64) -> Result<bool, RepositoryError> {
            let mut turns = self.turns.lock().unwrap();
            match turns.iter().position(|t| t.id == id) {
                Some(idx) => {
                    turns.remove(idx);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn list_session_ids(&self) -> Result<Vec<String>, RepositoryError> {
            let mut ids: Vec<String> = self
                .turns
                .lock()
                .unwrap()
                .iter()
                .map(|t| t.session_id.clone())
                .collect();
            ids.sort();
            ids.dedup();
            Ok(ids)
        }

        async fn count_turns(&self) -> Result<u64, RepositoryError> {
            Ok(self.len() as u64)
        }
    }

    fn epoch() -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
    }

    enum Behavior {
        Reply(GeneratedReply),
        Fail,
        Hang,
    }

    /// Generator that records what it was asked and answers per `behavior`.
    struct ScriptedGenerator {
        behavior: Behavior,
        seen: Mutex<Vec<ReplyRequest>>,
    }

    impl ScriptedGenerator {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn replying(category: &str) -> Self {
            Self::new(Behavior::Reply(GeneratedReply {
                content: "A contract is a legally binding agreement.".to_string(),
                category: category.to_string(),
                sources: vec!["Restatement (Second) of Contracts".to_string()],
            }))
        }

        fn last_request(&self) -> ReplyRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl ReplyGenerator for ScriptedGenerator {
        async fn generate(&self, request: &ReplyRequest) -> Result<GeneratedReply, GenerationError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.behavior {
                Behavior::Reply(reply) => Ok(reply.clone()),
                Behavior::Fail => Err(GenerationError::Provider(LlmError::Provider {
                    message: "upstream unavailable".to_string(),
                })),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!("timeout fires first")
                }
            }
        }
    }

    fn service(generator: ScriptedGenerator) -> ChatService<MockTurnRepository, ScriptedGenerator> {
        ChatService::new(MockTurnRepository::default(), generator, &ChatSettings::default())
    }

    fn submission(message: &str, session_id: &str, category: Option<&str>) -> SubmitMessage {
        SubmitMessage {
            message: message.to_string(),
            session_id: session_id.to_string(),
            category: category.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_submit_stores_user_then_assistant() {
        let svc = service(ScriptedGenerator::replying("contracts"));

        let reply = svc
            .submit(submission("What is a contract?", "S1", None))
            .await
            .unwrap();
        assert_eq!(reply.role, TurnRole::Assistant);
        assert_eq!(reply.category.as_deref(), Some("contracts"));

        let turns = svc.messages("S1").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].content, "What is a contract?");
        assert!(turns[0].category.is_none());
        assert!(turns[0].sources.is_none());
        assert_eq!(turns[1], reply);
    }

    #[tokio::test]
    async fn test_submit_empty_message_stores_nothing() {
        let svc = service(ScriptedGenerator::replying("contracts"));

        let err = svc.submit(submission("   ", "S1", None)).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(ref m) if m == "Message is required"));
        assert_eq!(svc.repo().len(), 0);
        assert!(svc.generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_empty_session_rejected() {
        let svc = service(ScriptedGenerator::replying("contracts"));

        let err = svc.submit(submission("hi", "", None)).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(ref m) if m == "Session ID is required"));
        assert_eq!(svc.repo().len(), 0);
    }

    #[tokio::test]
    async fn test_submit_whitespace_session_is_kept_verbatim() {
        let svc = service(ScriptedGenerator::replying("contracts"));

        let reply = svc.submit(submission("hi", "   ", None)).await.unwrap();
        assert_eq!(reply.session_id, "   ");
        assert_eq!(svc.messages("   ").await.unwrap().len(), 2);
        assert!(svc.messages("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_unknown_category_rejected() {
        let svc = service(ScriptedGenerator::replying("contracts"));

        let err = svc
            .submit(submission("hi", "S1", Some("maritime")))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(svc.repo().len(), 0);
    }

    #[tokio::test]
    async fn test_submit_passes_category_filter() {
        let svc = service(ScriptedGenerator::replying("tax"));

        svc.submit(submission("Do I owe tax?", "S1", Some("tax")))
            .await
            .unwrap();
        assert_eq!(
            svc.generator.last_request().category,
            CategoryFilter::Only(Category::Tax)
        );

        svc.submit(submission("And now?", "S1", Some("all")))
            .await
            .unwrap();
        assert_eq!(svc.generator.last_request().category, CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_generator_failure_stores_fallback() {
        let svc = service(ScriptedGenerator::new(Behavior::Fail));

        let reply = svc.submit(submission("hi", "S1", None)).await.unwrap();
        assert_eq!(reply.content, FALLBACK_REPLY_CONTENT);
        assert_eq!(reply.category.as_deref(), Some(FALLBACK_REPLY_CATEGORY));
        assert_eq!(reply.sources, Some(vec![FALLBACK_REPLY_SOURCE.to_string()]));

        let turns = svc.messages("S1").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[1].role, TurnRole::Assistant);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generator_timeout_stores_fallback() {
        let svc = service(ScriptedGenerator::new(Behavior::Hang));

        let reply = svc.submit(submission("hi", "S1", None)).await.unwrap();
        assert_eq!(reply.category.as_deref(), Some(FALLBACK_REPLY_CATEGORY));
        assert_eq!(svc.repo().len(), 2);
    }

    #[tokio::test]
    async fn test_history_is_bounded_and_includes_new_turn() {
        let svc = service(ScriptedGenerator::replying("family"));

        for i in 0..5 {
            svc.submit(submission(&format!("question {i}"), "S1", None))
                .await
                .unwrap();
        }

        let request = svc.generator.last_request();
        assert_eq!(request.history.len(), 6);
        let last = request.history.last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "question 4");
        assert_eq!(request.utterance, "question 4");
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_session() {
        let svc = service(ScriptedGenerator::replying("family"));

        svc.submit(submission("other session", "S2", None))
            .await
            .unwrap();
        svc.submit(submission("first", "S1", None)).await.unwrap();

        let request = svc.generator.last_request();
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.history[0].content, "first");
    }

    #[tokio::test]
    async fn test_delete_turn_then_not_found() {
        let svc = service(ScriptedGenerator::replying("contracts"));
        let reply = svc.submit(submission("hi", "S1", None)).await.unwrap();

        svc.delete_turn(reply.id).await.unwrap();
        let turns = svc.messages("S1").await.unwrap();
        assert!(turns.iter().all(|t| t.id != reply.id));

        let err = svc.delete_turn(reply.id).await.unwrap_err();
        assert!(matches!(err, ChatError::NotFound(id) if id == reply.id));
    }

    #[tokio::test]
    async fn test_stats_counts_sessions_and_turns() {
        let svc = service(ScriptedGenerator::replying("contracts"));
        svc.submit(submission("a", "S1", None)).await.unwrap();
        svc.submit(submission("b", "S2", None)).await.unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats, ChatStats { sessions: 2, turns: 4 });
        assert_eq!(svc.session_ids().await.unwrap(), vec!["S1", "S2"]);
    }
}
