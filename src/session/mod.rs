//! Cook-along session management
//!
//! This module provides the `CookingSession` abstraction that owns:
//! - Step progression through a recipe (advance, retreat, restart)
//! - The per-step countdown timer and its background tick task
//! - Pause state, capture state and transient voice feedback
//! - The mentor chat transcript
//! - A one-shot completion signal fired when the final step is finished

mod config;
mod session;
mod state;
mod stats;

pub use config::SessionConfig;
pub use session::CookingSession;
pub use stats::SessionStats;
