use crate::chat::{ChatPort, MentorChat};
use crate::session::CookingSession;
use crate::voice::{IntentDispatcher, SpeechPort};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A registered session together with its voice and chat front-ends
pub struct LiveSession {
    pub session: Arc<CookingSession>,
    pub dispatcher: IntentDispatcher,
    pub mentor: MentorChat,
}

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active cooking sessions, keyed by session id
    pub sessions: Arc<RwLock<HashMap<String, Arc<LiveSession>>>>,

    /// Chat backend shared by all sessions
    pub chat: Arc<dyn ChatPort>,

    /// Speech backend shared by all sessions
    pub speech: Arc<dyn SpeechPort>,
}

impl AppState {
    pub fn new(chat: Arc<dyn ChatPort>, speech: Arc<dyn SpeechPort>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            chat,
            speech,
        }
    }
}
