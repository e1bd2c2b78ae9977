use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the mentor chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// When this turn was appended
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Cooking context sent with every chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContext {
    pub recipe_name: String,
    /// Current step, 1-based
    pub current_step: usize,
    pub step_instruction: String,
}
