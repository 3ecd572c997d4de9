//! Infrastructure layer for LegalAssist.
//!
//! Contains implementations of the ports defined in `legalassist-core`:
//! the in-memory turn store, the OpenAI-compatible LLM provider, and the
//! TOML configuration loader.

pub mod config;
pub mod llm;
pub mod memory;
