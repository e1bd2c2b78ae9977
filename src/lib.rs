pub mod chat;
pub mod config;
pub mod http;
pub mod recipe;
pub mod session;
pub mod voice;

pub use chat::{ChatContext, ChatError, ChatMessage, ChatPort, ChatRole, HttpChatClient, MentorChat};
pub use config::Config;
pub use http::{create_router, AppState};
pub use recipe::{Recipe, RecipeStep};
pub use session::{CookingSession, SessionConfig, SessionStats};
pub use voice::{
    parse_intent, IntentDispatcher, MutedSpeech, SpeechPort, SpeechSettings, VoiceIntent,
};
