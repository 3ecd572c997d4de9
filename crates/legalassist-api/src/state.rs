//! Application state wiring the chat service together.
//!
//! `ChatService` is generic over its repository and generator; AppState
//! pins it to the in-memory store and the LLM-backed generator.

use std::sync::Arc;

use anyhow::Context;

use legalassist_core::chat::generator::LlmReplyGenerator;
use legalassist_core::chat::service::ChatService;
use legalassist_core::llm::box_provider::BoxLlmProvider;
use legalassist_infra::llm::{create_provider, resolve_api_key};
use legalassist_infra::memory::InMemoryTurnRepository;
use legalassist_types::config::AppConfig;

/// Concrete chat service pinned to infra implementations.
pub type ConcreteChatService = ChatService<InMemoryTurnRepository, LlmReplyGenerator>;

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Build the state from configuration: resolve the API key, create the
    /// provider, and wire an empty store.
    pub fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(&config.provider);
        let provider = create_provider(&config.provider, api_key).with_context(|| {
            format!(
                "cannot configure LLM provider '{}': set the {} environment variable",
                config.provider.name, config.provider.api_key_env
            )
        })?;
        Ok(Self::with_provider(provider, config))
    }

    /// Wire the state around an already-built provider.
    pub fn with_provider(provider: BoxLlmProvider, config: &AppConfig) -> Self {
        let generator = LlmReplyGenerator::new(provider, &config.provider);
        let chat_service =
            ChatService::new(InMemoryTurnRepository::new(), generator, &config.chat);
        Self {
            chat_service: Arc::new(chat_service),
        }
    }
}
