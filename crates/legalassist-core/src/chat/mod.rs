//! Chat turn persistence and orchestration.
//!
//! - `TurnRepository`: the session store port
//! - `ReplyGenerator`: the response generator port, with an LLM-backed
//!   implementation in [`generator::LlmReplyGenerator`]
//! - `ChatService`: validates a submission, records both sides of the
//!   exchange, and masks generator failures behind a fallback reply

pub mod generator;
pub mod prompt;
pub mod repository;
pub mod service;
