//! Voice control: the platform speech boundary, intent parsing and the
//! dispatcher that turns recognized intents into session transitions

mod dispatcher;
mod intent;
mod port;

pub use dispatcher::IntentDispatcher;
pub use intent::{parse_intent, VoiceIntent};
pub use port::{MutedSpeech, SpeechPort, SpeechSettings};
