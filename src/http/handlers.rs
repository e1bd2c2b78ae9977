use super::state::{AppState, LiveSession};
use crate::chat::{ChatMessage, MentorChat};
use crate::recipe::Recipe;
use crate::session::{CookingSession, SessionConfig, SessionStats};
use crate::voice::{parse_intent, IntentDispatcher, VoiceIntent};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Recipe to cook (defaults to the built-in demo recipe)
    pub recipe: Option<Recipe>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub step: StepView,
}

/// Current step as shown to the client
#[derive(Debug, Serialize)]
pub struct StepView {
    pub step_number: usize,
    pub total_steps: usize,
    pub title: String,
    pub instruction: String,
    pub tip: String,
    pub timer_seconds: u32,
    pub remaining_seconds: u32,
    pub is_last_step: bool,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub status: String,
    pub stats: SessionStats,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Transcribed voice command text
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub intent: VoiceIntent,
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatSendRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatSendResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct PauseRequest {
    pub paused: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions/start
/// Start a new cooking session
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    info!("Starting cooking session: {}", session_id);

    // Check if already cooking
    {
        let sessions = state.sessions.read().await;
        if sessions.contains_key(&session_id) {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Session {} is already active", session_id),
                }),
            )
                .into_response();
        }
    }

    let recipe = req.recipe.unwrap_or_else(Recipe::demo);
    let config = SessionConfig {
        session_id: session_id.clone(),
        ..SessionConfig::default()
    };

    let (session, completion) =
        match CookingSession::new(config, recipe, Arc::clone(&state.speech)).await {
            Ok(created) => created,
            Err(e) => {
                error!("Failed to create session: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to create session: {}", e),
                    }),
                )
                    .into_response();
            }
        };

    // Log the one-shot completion signal when the final step is finished
    {
        let session_id = session_id.clone();
        tokio::spawn(async move {
            if completion.await.is_ok() {
                info!("Cooking session {} completed", session_id);
            }
        });
    }

    let entry = Arc::new(LiveSession {
        dispatcher: IntentDispatcher::new(Arc::clone(&session), Arc::clone(&state.speech)),
        mentor: MentorChat::new(
            Arc::clone(&session),
            Arc::clone(&state.chat),
            Arc::clone(&state.speech),
        ),
        session,
    });

    let step = step_view(&entry.session).await;

    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), entry);
    }

    info!("Cooking session started: {}", session_id);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id,
            status: "active".to_string(),
            step,
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/stop
/// End a session and tear its background tasks down
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("Stopping cooking session: {}", session_id);

    let entry = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match entry {
        Some(entry) => {
            let stats = entry.session.stats().await;
            entry.session.end().await;
            (
                StatusCode::OK,
                Json(StopSessionResponse {
                    session_id,
                    status: "stopped".to_string(),
                    stats,
                }),
            )
                .into_response()
        }
        None => not_found(&session_id),
    }
}

/// GET /sessions/:session_id/status
pub async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => (StatusCode::OK, Json(entry.session.stats().await)).into_response(),
        None => not_found(&session_id),
    }
}

/// GET /sessions/:session_id/transcript
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            let transcript: Vec<ChatMessage> = entry.session.transcript().await;
            (StatusCode::OK, Json(transcript)).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/advance
pub async fn advance_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            entry.session.advance_step().await;
            (StatusCode::OK, Json(step_view(&entry.session).await)).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/back
pub async fn retreat_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            entry.session.retreat_step().await;
            (StatusCode::OK, Json(step_view(&entry.session).await)).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/timer/toggle
pub async fn toggle_timer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            entry.session.toggle_timer().await;
            (StatusCode::OK, Json(entry.session.stats().await)).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/pause
pub async fn set_paused(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<PauseRequest>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            entry.session.set_paused(req.paused).await;
            (StatusCode::OK, Json(entry.session.stats().await)).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/restart
pub async fn restart_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            entry.session.restart().await;
            (StatusCode::OK, Json(step_view(&entry.session).await)).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/command
/// Apply a transcribed voice command to the session
pub async fn voice_command(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<CommandRequest>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            let intent = parse_intent(&req.text);
            let feedback = entry.dispatcher.dispatch(intent.clone()).await;
            (StatusCode::OK, Json(CommandResponse { intent, feedback })).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/chat
/// Ask the mentor a question about the current step
pub async fn send_chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<ChatSendRequest>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(entry) => {
            if entry.session.stats().await.chat_loading {
                return (
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: "A chat request is already in flight".to_string(),
                    }),
                )
                    .into_response();
            }
            let reply = entry.mentor.send_message(&req.message).await;
            (StatusCode::OK, Json(ChatSendResponse { reply })).into_response()
        }
        None => not_found(&session_id),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Helpers
// ============================================================================

async fn find_session(state: &AppState, session_id: &str) -> Option<Arc<LiveSession>> {
    let sessions = state.sessions.read().await;
    sessions.get(session_id).cloned()
}

fn not_found(session_id: &str) -> axum::response::Response {
    error!("Session {} not found", session_id);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session {} not found", session_id),
        }),
    )
        .into_response()
}

async fn step_view(session: &CookingSession) -> StepView {
    let stats = session.stats().await;
    let step = session.recipe().step(stats.step_number - 1);

    StepView {
        step_number: stats.step_number,
        total_steps: stats.total_steps,
        title: step.title.clone(),
        instruction: step.instruction.clone(),
        tip: step.tip.clone(),
        timer_seconds: step.timer_seconds,
        remaining_seconds: stats.remaining_seconds,
        is_last_step: stats.step_number == stats.total_steps,
        completed: stats.completed,
    }
}
