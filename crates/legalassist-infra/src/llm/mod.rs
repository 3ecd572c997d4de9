//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `legalassist-core`, plus a factory
//! ([`create_provider`]) that builds it from [`ProviderSettings`].
//!
//! [`LlmProvider`]: legalassist_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use legalassist_core::llm::box_provider::BoxLlmProvider;
use legalassist_types::config::ProviderSettings;
use legalassist_types::llm::LlmError;

use self::openai_compat::config::{
    gemini_defaults, mistral_defaults, openai_defaults, OpenAiCompatConfig, OPENAI_BASE_URL,
};
use self::openai_compat::OpenAiCompatibleProvider;

/// Read the API key from the environment variable named in `settings`.
///
/// An unset or blank variable yields `None`.
pub fn resolve_api_key(settings: &ProviderSettings) -> Option<SecretString> {
    resolve_api_key_with(settings, |name| std::env::var(name).ok())
}

fn resolve_api_key_with(
    settings: &ProviderSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    lookup(&settings.api_key_env)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

/// Create a [`BoxLlmProvider`] from [`ProviderSettings`].
///
/// Well-known provider names start from their defaults; any other name
/// targets OpenAI's URL. `settings.base_url` overrides either.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is provided.
pub fn create_provider(
    settings: &ProviderSettings,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let api_key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let config = provider_config(settings, api_key);

    tracing::info!(
        provider = %config.provider_name,
        model = %config.model,
        base_url = %config.base_url,
        "LLM provider configured"
    );

    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
}

fn provider_config(settings: &ProviderSettings, api_key: SecretString) -> OpenAiCompatConfig {
    let mut config = match settings.name.as_str() {
        "openai" => openai_defaults(api_key, &settings.model),
        "mistral" => mistral_defaults(api_key, &settings.model),
        "gemini" => gemini_defaults(api_key, &settings.model),
        other => {
            if settings.base_url.is_none() {
                tracing::warn!(
                    provider = %other,
                    "Unknown provider without base_url, defaulting to {OPENAI_BASE_URL}"
                );
            }
            OpenAiCompatConfig {
                provider_name: other.to_string(),
                base_url: OPENAI_BASE_URL.to_string(),
                api_key,
                model: settings.model.clone(),
            }
        }
    };

    if let Some(base_url) = &settings.base_url {
        config.base_url = base_url.clone();
    }
    config
}
