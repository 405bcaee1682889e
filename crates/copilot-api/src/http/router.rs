//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Wizard sessions
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/sessions/{id}/submit", post(handlers::session::submit_session))
        .route(
            "/sessions/{id}/support",
            post(handlers::session::request_session_support),
        )
        // Draft
        .route("/sessions/{id}/draft", get(handlers::draft::get_draft))
        .route(
            "/sessions/{id}/draft/warnings",
            get(handlers::draft::get_warnings),
        )
        .route(
            "/sessions/{id}/draft/{section}",
            put(handlers::draft::put_section).delete(handlers::draft::delete_section),
        )
        // Sidebar assistant
        .route(
            "/sessions/{id}/chat",
            get(handlers::chat::get_transcript)
                .post(handlers::chat::send_message)
                .delete(handlers::chat::clear_chat),
        )
        .route(
            "/sessions/{id}/assist/{action}",
            post(handlers::chat::assist),
        )
        // Feedback
        .route("/feedback", post(handlers::feedback::submit_feedback));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> impl IntoResponse {
    ApiResponse::error(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        "No such route",
        uuid::Uuid::now_v7().to_string(),
    )
}
