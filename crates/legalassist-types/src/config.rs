//! Global configuration types for LegalAssist.
//!
//! `AppConfig` represents the top-level `legalassist.toml` that controls the
//! listening address, the chat orchestration knobs, and the LLM provider.
//! Every field has a default, so an empty file (or no file) is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub chat: ChatSettings,

    #[serde(default)]
    pub provider: ProviderSettings,
}

impl AppConfig {
    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chat.history_window == 0 {
            return Err(ConfigError::Invalid(
                "chat.history_window must be at least 1".to_string(),
            ));
        }
        if self.chat.generator_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "chat.generator_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::Invalid(format!(
                "provider.temperature must be between 0 and 2, got {}",
                self.provider.temperature
            )));
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.model must not be empty".to_string()));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Chat orchestration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Number of most recent turns handed to the generator as context.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Upper bound on a single generator call before falling back.
    #[serde(default = "default_generator_timeout_secs")]
    pub generator_timeout_secs: u64,
}

fn default_history_window() -> usize {
    6
}

fn default_generator_timeout_secs() -> u64 {
    60
}

impl ChatSettings {
    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator_timeout_secs)
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            generator_timeout_secs: default_generator_timeout_secs(),
        }
    }
}

/// LLM provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Human-readable provider name (e.g., "openai", "mistral").
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// Override the provider's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request `response_format: json_object`. Turn off for endpoints that
    /// reject the parameter.
    #[serde(default = "default_json_mode")]
    pub json_mode: bool,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_json_mode() -> bool {
    true
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key_env: default_api_key_env(),
            json_mode: default_json_mode(),
        }
    }
}
