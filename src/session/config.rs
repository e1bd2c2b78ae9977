use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a cooking session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g. "session-2026-08-04-dinner")
    pub session_id: String,

    /// Interval between countdown ticks
    /// Default: 1 second
    pub tick_interval: Duration,

    /// How long dispatcher feedback stays on screen before it is cleared
    pub feedback_clear: Duration,

    /// How long the capture-failure notice stays on screen
    pub capture_error_clear: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            tick_interval: Duration::from_secs(1),
            feedback_clear: Duration::from_secs(3),
            capture_error_clear: Duration::from_secs(2),
        }
    }
}
