use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a cooking session's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session identifier
    pub session_id: String,

    /// Name of the recipe being cooked
    pub recipe_name: String,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Total session duration in seconds
    pub duration_secs: f64,

    /// Current step, 1-based
    pub step_number: usize,

    /// Total number of steps in the recipe
    pub total_steps: usize,

    /// Title of the current step
    pub step_title: String,

    /// Seconds left on the step countdown
    pub remaining_seconds: u32,

    /// Whether the countdown is running
    pub timer_running: bool,

    /// Whether the session is paused
    pub paused: bool,

    /// Whether voice capture is active
    pub listening: bool,

    /// Whether the tip/chat panel is open
    pub tip_open: bool,

    /// Whether a chat reply is in flight
    pub chat_loading: bool,

    /// Whether the final step has been finished
    pub completed: bool,

    /// Number of chat transcript entries
    pub transcript_len: usize,

    /// Transient voice feedback currently shown, if any
    pub last_voice_feedback: Option<String>,
}
