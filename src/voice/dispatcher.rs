use super::intent::VoiceIntent;
use super::port::SpeechPort;
use crate::session::CookingSession;
use std::sync::Arc;
use tracing::{debug, warn};

/// Feedback shown when a command was not understood
const COMMAND_HINT: &str = r#"Try: "Next", "Repeat", "Timer 5 min""#;

/// Maps recognized voice intents to session transitions and runs the
/// push-to-talk protocol around them
pub struct IntentDispatcher {
    session: Arc<CookingSession>,
    speech: Arc<dyn SpeechPort>,
}

impl IntentDispatcher {
    pub fn new(session: Arc<CookingSession>, speech: Arc<dyn SpeechPort>) -> Self {
        Self { session, speech }
    }

    /// Push-to-talk toggle.
    ///
    /// First press stops any active narration and opens capture; the press
    /// while listening closes capture, waits for recognition and applies the
    /// recognized intent. Capture failures surface as transient feedback and
    /// never reach the dispatch table. Voice capture is disabled while the
    /// session is paused.
    pub async fn toggle_mic(&self) {
        if self.session.is_paused().await {
            debug!("Mic toggle ignored while paused");
            return;
        }

        if self.session.is_listening().await {
            self.session.set_listening(false).await;
            self.session.set_feedback("Processing...", None).await;

            let intent = match self.speech.stop_listening_and_parse().await {
                Ok(intent) => intent,
                Err(e) => {
                    warn!("Voice recognition failed: {}", e);
                    VoiceIntent::Unknown
                }
            };
            self.dispatch(intent).await;
        } else {
            // The speech device is single-stream: stop narration before
            // opening capture.
            self.speech.stop_speaking().await;

            let started = match self.speech.start_listening().await {
                Ok(started) => started,
                Err(e) => {
                    warn!("Voice capture failed to start: {}", e);
                    false
                }
            };

            if started {
                self.session.set_listening(true).await;
                self.session.set_feedback("Listening...", None).await;
            } else {
                let clear = self.session.config().capture_error_clear;
                self.session
                    .set_feedback("Mic not available", Some(clear))
                    .await;
            }
        }
    }

    /// Apply one recognized intent to the session and return the feedback
    /// label, which is also shown on the session and cleared after the
    /// configured display window.
    pub async fn dispatch(&self, intent: VoiceIntent) -> String {
        let feedback = match intent {
            VoiceIntent::Next => {
                self.session.advance_step().await;
                "Next step!".to_string()
            }
            VoiceIntent::Prev => {
                self.session.retreat_step().await;
                "Previous step".to_string()
            }
            VoiceIntent::Repeat => {
                let step = self.session.current_step().await;
                self.narrate(step.instruction);
                "Repeating...".to_string()
            }
            VoiceIntent::Timer { duration_seconds } => {
                let seconds = match duration_seconds {
                    Some(seconds) => seconds,
                    None => self.session.current_step().await.timer_seconds,
                };
                self.session.set_timer(seconds).await;
                let minutes = seconds / 60;
                self.narrate(format!("Timer set for {} minutes", minutes));
                format!("Timer set: {}m", minutes)
            }
            VoiceIntent::Pause => {
                self.session.set_paused(true).await;
                "Paused".to_string()
            }
            VoiceIntent::Resume => {
                self.session.set_paused(false).await;
                "Resuming".to_string()
            }
            VoiceIntent::Help => {
                self.narrate("You can say next, back, repeat, pause, resume, or set a timer.");
                COMMAND_HINT.to_string()
            }
            VoiceIntent::Unknown => {
                self.narrate("Sorry, I didn't catch that. Try saying next, repeat, or set a timer.");
                COMMAND_HINT.to_string()
            }
        };

        let clear = self.session.config().feedback_clear;
        self.session
            .set_feedback(feedback.clone(), Some(clear))
            .await;
        feedback
    }

    fn narrate(&self, text: impl Into<String>) {
        let speech = Arc::clone(&self.speech);
        let text = text.into();
        tokio::spawn(async move {
            if let Err(e) = speech.speak(&text).await {
                warn!("Narration failed: {}", e);
            }
        });
    }
}
