//! Mentor chat: transcript management and the remote chat boundary

mod http;
mod messages;
mod port;
mod transcript;

pub use http::HttpChatClient;
pub use messages::{ChatContext, ChatMessage, ChatRole};
pub use port::{ChatError, ChatPort};
pub use transcript::MentorChat;
