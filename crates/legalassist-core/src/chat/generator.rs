//! Response generator port and its LLM-backed implementation.
//!
//! The generator is an opaque collaborator: given the user's utterance, an
//! optional category, and recent history, it returns reply text, a
//! category, and source labels. It reports failures as errors; masking them
//! is the orchestrator's job.

use std::time::Duration;

use legalassist_types::category::CategoryFilter;
use legalassist_types::config::ProviderSettings;
use legalassist_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use super::prompt::{category_hint, parse_reply, SYSTEM_PROMPT};
use crate::llm::box_provider::BoxLlmProvider;

/// Input to a single generation.
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    /// The user's question, as submitted.
    pub utterance: String,
    pub category: CategoryFilter,
    /// Recent turns of the session, oldest first.
    pub history: Vec<Message>,
}

/// A structured reply from the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReply {
    pub content: String,
    pub category: String,
    pub sources: Vec<String>,
}

/// Why a generation did not produce a usable reply.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("generator timed out after {0:?}")]
    Timeout(Duration),
}

/// Trait for response generators.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ReplyGenerator: Send + Sync {
    fn generate(
        &self,
        request: &ReplyRequest,
    ) -> impl std::future::Future<Output = Result<GeneratedReply, GenerationError>> + Send;
}

/// Generator that prompts an LLM for a JSON reply.
pub struct LlmReplyGenerator {
    provider: BoxLlmProvider,
    model: String,
    temperature: f64,
    max_tokens: u32,
    json_mode: bool,
}

impl LlmReplyGenerator {
    pub fn new(provider: BoxLlmProvider, settings: &ProviderSettings) -> Self {
        Self {
            provider,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            json_mode: settings.json_mode,
        }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Build the completion request for a generation.
    ///
    /// Layout: system prompt, history, the utterance, then the category
    /// hint when a category is selected. The history normally already ends
    /// with the stored user turn for this utterance; it is not repeated.
    pub fn build_request(&self, request: &ReplyRequest) -> CompletionRequest {
        let mut messages = Vec::with_capacity(request.history.len() + 3);
        messages.push(Message::new(MessageRole::System, SYSTEM_PROMPT));
        messages.extend(request.history.iter().cloned());

        let already_last = request
            .history
            .last()
            .is_some_and(|m| m.role == MessageRole::User && m.content == request.utterance);
        if !already_last {
            messages.push(Message::new(MessageRole::User, request.utterance.clone()));
        }

        if let Some(category) = request.category.category() {
            messages.push(Message::new(MessageRole::System, category_hint(category)));
        }

        CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            json_mode: self.json_mode,
        }
    }
}

impl ReplyGenerator for LlmReplyGenerator {
    async fn generate(&self, request: &ReplyRequest) -> Result<GeneratedReply, GenerationError> {
        let completion = self.build_request(request);
        let response = self.provider.complete(&completion).await?;
        tracing::debug!(
            provider = self.provider.name(),
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Generator completion received"
        );
        parse_reply(&response.content)
    }
}
