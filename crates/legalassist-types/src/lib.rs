//! Shared domain types for LegalAssist.
//!
//! This crate contains the core domain types used across the service:
//! chat turns, legal categories, LLM request shapes, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod category;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
