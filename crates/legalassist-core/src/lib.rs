//! Business logic and port definitions for LegalAssist.
//!
//! This crate defines the "ports" (the turn repository, the reply generator
//! and the LLM provider) that the infrastructure layer implements, plus the
//! chat orchestrator that ties them together. It depends only on
//! `legalassist-types` -- never on `legalassist-infra` or any IO crate.

pub mod chat;
pub mod llm;
