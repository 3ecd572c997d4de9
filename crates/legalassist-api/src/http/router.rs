//! Axum router configuration with middleware.
//!
//! API routes live under `/api`; `/health` sits at the root.
//! Middleware: CORS, request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // GET takes a session id and DELETE a turn id; both share one path
    // pattern because the router rejects differently named captures there.
    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::submit_chat))
        .route(
            "/messages/{key}",
            get(handlers::messages::list_messages).delete(handlers::messages::delete_message),
        )
        .route("/sessions", get(handlers::sessions::list_sessions));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
