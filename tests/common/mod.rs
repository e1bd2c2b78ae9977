// Shared test doubles for the speech and chat boundaries
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use chefmentor_live::chat::{ChatContext, ChatError, ChatMessage, ChatPort};
use chefmentor_live::voice::{SpeechPort, SpeechSettings, VoiceIntent};
use std::sync::Mutex;

/// Speech port that records every call and plays back scripted results
pub struct RecordingSpeech {
    /// Call log, in invocation order
    pub calls: Mutex<Vec<String>>,
    /// Every narration text passed to `speak`
    pub spoken: Mutex<Vec<String>>,
    /// Scripted results for `start_listening` (consumed front-first, then true)
    pub start_results: Mutex<Vec<bool>>,
    /// Intent returned by the next `stop_listening_and_parse`; None means
    /// recognition fails
    pub next_intent: Mutex<Option<VoiceIntent>>,
    /// Whether `speak` should fail
    pub fail_speak: bool,
    settings: Mutex<SpeechSettings>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::with_settings(SpeechSettings::default())
    }

    pub fn with_settings(settings: SpeechSettings) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            spoken: Mutex::new(Vec::new()),
            start_results: Mutex::new(Vec::new()),
            next_intent: Mutex::new(None),
            fail_speak: false,
            settings: Mutex::new(settings),
        }
    }

    pub fn failing_narration() -> Self {
        Self {
            fail_speak: true,
            ..Self::new()
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpeechPort for RecordingSpeech {
    async fn start_listening(&self) -> Result<bool> {
        self.record("start_listening");
        let mut results = self.start_results.lock().unwrap();
        if results.is_empty() {
            Ok(true)
        } else {
            Ok(results.remove(0))
        }
    }

    async fn stop_listening_and_parse(&self) -> Result<VoiceIntent> {
        self.record("stop_listening_and_parse");
        self.next_intent
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow!("recognition produced no intent"))
    }

    async fn cancel_listening(&self) {
        self.record("cancel_listening");
    }

    async fn speak(&self, text: &str) -> Result<()> {
        self.record("speak");
        if self.fail_speak {
            return Err(anyhow!("speech synthesis unavailable"));
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn stop_speaking(&self) {
        self.record("stop_speaking");
    }

    fn set_rate(&self, multiplier: f32) {
        self.settings.lock().unwrap().rate = multiplier;
    }

    fn settings(&self) -> SpeechSettings {
        *self.settings.lock().unwrap()
    }
}

/// Chat port that records what it was asked and returns a fixed reply
pub struct ScriptedChat {
    pub reply: String,
    /// Context captured from each call
    pub contexts: Mutex<Vec<ChatContext>>,
    /// Transcript length seen at each call
    pub message_counts: Mutex<Vec<usize>>,
}

impl ScriptedChat {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            contexts: Mutex::new(Vec::new()),
            message_counts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ChatPort for ScriptedChat {
    async fn send_chat(
        &self,
        messages: &[ChatMessage],
        context: &ChatContext,
    ) -> Result<String, ChatError> {
        self.contexts.lock().unwrap().push(context.clone());
        self.message_counts.lock().unwrap().push(messages.len());
        Ok(self.reply.clone())
    }
}

/// Chat port whose backend is always unreachable
pub struct FailingChat;

#[async_trait::async_trait]
impl ChatPort for FailingChat {
    async fn send_chat(
        &self,
        _messages: &[ChatMessage],
        _context: &ChatContext,
    ) -> Result<String, ChatError> {
        Err(ChatError::Network("connection refused".to_string()))
    }
}
