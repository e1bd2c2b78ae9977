use super::messages::{ChatContext, ChatMessage};
use thiserror::Error;

/// Failures from the mentor backend
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never produced a usable response (connect failure,
    /// timeout, malformed body)
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("server returned status {0}")]
    Server(u16),
}

/// Remote mentor chat boundary
#[async_trait::async_trait]
pub trait ChatPort: Send + Sync {
    /// Send the full transcript plus cooking context and return the
    /// assistant's reply text.
    async fn send_chat(
        &self,
        messages: &[ChatMessage],
        context: &ChatContext,
    ) -> Result<String, ChatError>;
}
