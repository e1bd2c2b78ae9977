use super::intent::VoiceIntent;
use anyhow::Result;
use std::sync::Mutex;
use tracing::debug;

/// Narration settings reported by a speech backend
#[derive(Debug, Clone, Copy)]
pub struct SpeechSettings {
    /// Read assistant replies aloud automatically
    pub auto_read: bool,
    /// Narration rate multiplier (1.0 = normal)
    pub rate: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            auto_read: true,
            rate: 1.0,
        }
    }
}

/// Platform speech service boundary
///
/// The underlying device is single-stream: it cannot capture and narrate at
/// the same time. Implementations of `start_listening` must stop any active
/// narration before opening the capture device.
///
/// Platform-specific implementations:
/// - Mobile: on-device speech recognition + TTS
/// - Headless/server: `MutedSpeech` (no capture, narration dropped)
#[async_trait::async_trait]
pub trait SpeechPort: Send + Sync {
    /// Begin voice capture
    ///
    /// Suspends until the capture device is ready. Returns false when the
    /// device is unavailable (no microphone, permission denied).
    async fn start_listening(&self) -> Result<bool>;

    /// End capture and resolve the recognized intent
    ///
    /// Suspends while speech-to-text completes. Callers treat an error as an
    /// unrecognized command, not a hard failure.
    async fn stop_listening_and_parse(&self) -> Result<VoiceIntent>;

    /// Abandon an in-flight capture without running recognition
    async fn cancel_listening(&self);

    /// Narrate text aloud. May be interrupted by `stop_speaking`.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Cancel any active narration
    async fn stop_speaking(&self);

    /// Adjust the narration rate multiplier
    fn set_rate(&self, multiplier: f32);

    /// Current narration settings
    fn settings(&self) -> SpeechSettings;
}

/// Speech backend for headless deployments: capture is never available and
/// narration is logged and dropped
pub struct MutedSpeech {
    settings: Mutex<SpeechSettings>,
}

impl MutedSpeech {
    pub fn new(settings: SpeechSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

#[async_trait::async_trait]
impl SpeechPort for MutedSpeech {
    async fn start_listening(&self) -> Result<bool> {
        debug!("No capture device in headless mode");
        Ok(false)
    }

    async fn stop_listening_and_parse(&self) -> Result<VoiceIntent> {
        Ok(VoiceIntent::Unknown)
    }

    async fn cancel_listening(&self) {}

    async fn speak(&self, text: &str) -> Result<()> {
        debug!("Narration dropped: {}", text);
        Ok(())
    }

    async fn stop_speaking(&self) {}

    fn set_rate(&self, multiplier: f32) {
        self.settings.lock().unwrap().rate = multiplier;
    }

    fn settings(&self) -> SpeechSettings {
        *self.settings.lock().unwrap()
    }
}
