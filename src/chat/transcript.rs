use super::messages::ChatMessage;
use super::port::ChatPort;
use crate::session::CookingSession;
use crate::voice::SpeechPort;
use std::sync::Arc;
use tracing::warn;

/// Canned assistant reply when the backend is unreachable
const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting to the chef brain right now.";

/// Mediates the mentor chat: appends turns to the session transcript and
/// drives the Chat Port round trip.
///
/// The transcript only grows, in append order, and the chat surface never
/// shows a raw error: backend failures turn into a canned assistant reply.
pub struct MentorChat {
    session: Arc<CookingSession>,
    chat: Arc<dyn ChatPort>,
    speech: Arc<dyn SpeechPort>,
}

impl MentorChat {
    pub fn new(
        session: Arc<CookingSession>,
        chat: Arc<dyn ChatPort>,
        speech: Arc<dyn SpeechPort>,
    ) -> Self {
        Self {
            session,
            chat,
            speech,
        }
    }

    /// Send one user message and return the assistant reply that was
    /// appended to the transcript.
    ///
    /// The user turn is visible immediately; the loading flag covers exactly
    /// the backend round trip. When auto-read is on, successful replies are
    /// narrated fire-and-forget; narration failure never touches the
    /// transcript.
    pub async fn send_message(&self, text: &str) -> String {
        self.session.set_tip_open(true).await;
        self.session.push_message(ChatMessage::user(text)).await;
        self.session.set_chat_loading(true).await;

        let (messages, context) = self.session.chat_snapshot().await;

        let reply = match self.chat.send_chat(&messages, &context).await {
            Ok(reply) => {
                if self.speech.settings().auto_read {
                    let speech = Arc::clone(&self.speech);
                    let narration = reply.clone();
                    tokio::spawn(async move {
                        if let Err(e) = speech.speak(&narration).await {
                            warn!("Reply narration failed: {}", e);
                        }
                    });
                }
                reply
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };

        self.session
            .push_message(ChatMessage::assistant(reply.clone()))
            .await;
        self.session.set_chat_loading(false).await;

        reply
    }
}
