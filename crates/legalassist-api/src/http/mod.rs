//! HTTP/REST API layer for LegalAssist.
//!
//! Axum-based REST API at `/api/` returning bare JSON bodies, with
//! `{ "message", "code" }` errors and permissive CORS.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
