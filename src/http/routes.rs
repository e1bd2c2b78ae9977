use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/sessions/start", post(handlers::start_session))
        .route("/sessions/:session_id/stop", post(handlers::stop_session))
        // Session queries
        .route("/sessions/:session_id/status", get(handlers::get_status))
        .route(
            "/sessions/:session_id/transcript",
            get(handlers::get_transcript),
        )
        // Step and timer controls
        .route("/sessions/:session_id/advance", post(handlers::advance_step))
        .route("/sessions/:session_id/back", post(handlers::retreat_step))
        .route(
            "/sessions/:session_id/timer/toggle",
            post(handlers::toggle_timer),
        )
        .route("/sessions/:session_id/pause", post(handlers::set_paused))
        .route(
            "/sessions/:session_id/restart",
            post(handlers::restart_session),
        )
        // Voice and chat
        .route("/sessions/:session_id/command", post(handlers::voice_command))
        .route("/sessions/:session_id/chat", post(handlers::send_chat))
        // Request logging, plus CORS for the mobile client
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
