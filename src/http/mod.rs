//! HTTP API server for driving cooking sessions externally
//!
//! This module provides a REST API over the session core:
//! - POST /sessions/start - Start a cooking session
//! - POST /sessions/:id/stop - End a session
//! - GET  /sessions/:id/status - Query session state
//! - GET  /sessions/:id/transcript - Get the chat transcript
//! - POST /sessions/:id/advance|back|timer/toggle|pause|restart - Controls
//! - POST /sessions/:id/command - Apply a transcribed voice command
//! - POST /sessions/:id/chat - Ask the mentor a question
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::{AppState, LiveSession};
