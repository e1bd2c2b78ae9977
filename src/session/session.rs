use super::config::SessionConfig;
use super::state::{SessionState, StepOutcome, TickOutcome};
use super::stats::SessionStats;
use crate::chat::{ChatContext, ChatMessage};
use crate::recipe::{Recipe, RecipeStep};
use crate::voice::SpeechPort;
use anyhow::{bail, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A cook-along session: the single owner of step progress, the countdown
/// timer, pause/capture state, transient voice feedback and the chat
/// transcript.
///
/// Every operation takes the one state lock for its whole mutation, so step
/// changes are atomic with respect to countdown ticks. The countdown runs on
/// a background task that is armed while the timer is running and the session
/// is not paused, and disarmed otherwise; `end` tears both background tasks
/// down so nothing fires against a discarded session.
pub struct CookingSession {
    /// Session configuration
    config: SessionConfig,

    /// The recipe being cooked (immutable for the session's lifetime)
    recipe: Recipe,

    /// Platform speech service for narration and capture control
    speech: Arc<dyn SpeechPort>,

    /// When the session started
    started_at: chrono::DateTime<chrono::Utc>,

    /// Mutable session state
    state: Arc<Mutex<SessionState>>,

    /// Handle for the countdown tick task
    timer_task: Mutex<Option<JoinHandle<()>>>,

    /// Handle for the scheduled feedback clear
    feedback_task: Mutex<Option<JoinHandle<()>>>,

    /// One-shot completion signal, taken when the final step is finished
    completion_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl CookingSession {
    /// Create a new session positioned on the first step, with that step's
    /// timer preloaded. Returns the session plus a receiver that fires
    /// exactly once when the final step is finished.
    pub async fn new(
        config: SessionConfig,
        recipe: Recipe,
        speech: Arc<dyn SpeechPort>,
    ) -> Result<(Arc<Self>, oneshot::Receiver<()>)> {
        if recipe.is_empty() {
            bail!("Recipe '{}' has no steps", recipe.name);
        }

        info!(
            "Creating cooking session {} for '{}' ({} steps)",
            config.session_id,
            recipe.name,
            recipe.len()
        );

        let (completion_tx, completion_rx) = oneshot::channel();

        let session = Arc::new(Self {
            state: Arc::new(Mutex::new(SessionState::new(&recipe))),
            config,
            recipe,
            speech,
            started_at: Utc::now(),
            timer_task: Mutex::new(None),
            feedback_task: Mutex::new(None),
            completion_tx: Mutex::new(Some(completion_tx)),
        });

        session.announce_current_step().await;

        Ok((session, completion_rx))
    }

    pub fn id(&self) -> &str {
        &self.config.session_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Move to the next step, or finish the session from the last one.
    ///
    /// Finishing fires the completion signal once; the step index never moves
    /// past the final step, and calls after completion are ignored. The chat
    /// transcript is untouched either way.
    pub async fn advance_step(&self) {
        let outcome = {
            let mut state = self.state.lock().await;
            state.advance(&self.recipe)
        };

        match outcome {
            StepOutcome::Moved => {
                self.log_step().await;
                self.sync_timer_task().await;
                self.announce_current_step().await;
            }
            StepOutcome::Finished => {
                info!("Session {} completed", self.config.session_id);
                self.sync_timer_task().await;
                if let Some(tx) = self.completion_tx.lock().await.take() {
                    let _ = tx.send(());
                }
            }
            StepOutcome::Unchanged => {
                debug!("Advance ignored for session {}", self.config.session_id);
            }
        }
    }

    /// Move back one step; a no-op on the first step.
    pub async fn retreat_step(&self) {
        let outcome = {
            let mut state = self.state.lock().await;
            state.retreat(&self.recipe)
        };

        match outcome {
            StepOutcome::Moved => {
                self.log_step().await;
                self.sync_timer_task().await;
                self.announce_current_step().await;
            }
            _ => {
                debug!("Retreat ignored for session {}", self.config.session_id);
            }
        }
    }

    /// Start or stop the step countdown. Starting with zero seconds left is
    /// a no-op.
    pub async fn toggle_timer(&self) {
        {
            let mut state = self.state.lock().await;
            state.toggle_timer();
        }
        self.sync_timer_task().await;
    }

    /// Load an explicit countdown duration and start it, regardless of prior
    /// timer state.
    pub async fn set_timer(&self, seconds: u32) {
        {
            let mut state = self.state.lock().await;
            state.set_timer(seconds);
        }
        self.sync_timer_task().await;
    }

    /// Count down one second. Driven by the internal clock task; exposed so
    /// tests and external clocks can step the countdown deterministically.
    pub async fn tick(&self) {
        let outcome = {
            let mut state = self.state.lock().await;
            state.tick()
        };
        if outcome == TickOutcome::Expired {
            info!("Step timer finished for session {}", self.config.session_id);
        }
    }

    /// Pause or resume. Pausing freezes the countdown exactly where it is and
    /// cancels any in-flight voice capture; resuming continues from the
    /// frozen value.
    pub async fn set_paused(&self, paused: bool) {
        let was_listening = {
            let mut state = self.state.lock().await;
            if state.completed {
                return;
            }
            state.set_paused(paused);
            let was_listening = state.listening;
            if paused {
                state.listening = false;
            }
            was_listening
        };

        if paused && was_listening {
            self.speech.cancel_listening().await;
        }

        info!(
            "Session {} {}",
            self.config.session_id,
            if paused { "paused" } else { "resumed" }
        );
        self.sync_timer_task().await;
    }

    /// Back to the first step with a fresh timer and pause cleared. The chat
    /// transcript is kept.
    pub async fn restart(&self) {
        {
            let mut state = self.state.lock().await;
            state.restart(&self.recipe);
        }
        info!("Session {} restarted", self.config.session_id);
        self.sync_timer_task().await;
        self.announce_current_step().await;
    }

    /// Open or close the tip/chat panel. The panel closes on step changes.
    pub async fn set_tip_open(&self, open: bool) {
        let mut state = self.state.lock().await;
        state.tip_open = open;
    }

    /// The step the session is currently on.
    pub async fn current_step(&self) -> RecipeStep {
        let state = self.state.lock().await;
        self.recipe.step(state.current_step).clone()
    }

    /// The accumulated chat transcript, in append order.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        let state = self.state.lock().await;
        state.transcript.clone()
    }

    /// Current session snapshot.
    pub async fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);
        let state = self.state.lock().await;
        let step = self.recipe.step(state.current_step);

        SessionStats {
            session_id: self.config.session_id.clone(),
            recipe_name: self.recipe.name.clone(),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            step_number: state.current_step + 1,
            total_steps: self.recipe.len(),
            step_title: step.title.clone(),
            remaining_seconds: state.remaining_seconds,
            timer_running: state.timer_running,
            paused: state.paused,
            listening: state.listening,
            tip_open: state.tip_open,
            chat_loading: state.chat_loading,
            completed: state.completed,
            transcript_len: state.transcript.len(),
            last_voice_feedback: state.last_voice_feedback.clone(),
        }
    }

    /// Tear the session down: stop the countdown and feedback tasks and
    /// release the speech service. Must be called before the session is
    /// discarded so no tick can fire against it afterwards.
    pub async fn end(&self) {
        info!("Ending session {}", self.config.session_id);

        if let Some(task) = self.timer_task.lock().await.take() {
            task.abort();
        }
        if let Some(task) = self.feedback_task.lock().await.take() {
            task.abort();
        }

        let was_listening = {
            let mut state = self.state.lock().await;
            let was_listening = state.listening;
            state.listening = false;
            was_listening
        };
        if was_listening {
            self.speech.cancel_listening().await;
        }
        self.speech.stop_speaking().await;
    }

    // Crate-internal state access for the dispatcher and mentor chat

    pub(crate) async fn is_listening(&self) -> bool {
        self.state.lock().await.listening
    }

    pub(crate) async fn is_paused(&self) -> bool {
        self.state.lock().await.paused
    }

    pub(crate) async fn set_listening(&self, listening: bool) {
        let mut state = self.state.lock().await;
        state.listening = listening;
    }

    /// Show transient feedback. A scheduled clear (when requested) replaces
    /// any previously scheduled one, so newer feedback always wins.
    pub(crate) async fn set_feedback(&self, text: impl Into<String>, clear_after: Option<Duration>) {
        {
            let mut state = self.state.lock().await;
            state.last_voice_feedback = Some(text.into());
        }

        let mut task = self.feedback_task.lock().await;
        if let Some(previous) = task.take() {
            previous.abort();
        }
        if let Some(delay) = clear_after {
            let state = Arc::clone(&self.state);
            *task = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                state.lock().await.last_voice_feedback = None;
            }));
        }
    }

    pub(crate) async fn push_message(&self, message: ChatMessage) {
        let mut state = self.state.lock().await;
        state.transcript.push(message);
    }

    pub(crate) async fn set_chat_loading(&self, loading: bool) {
        let mut state = self.state.lock().await;
        state.chat_loading = loading;
    }

    /// Transcript copy plus the cooking context sent with chat requests.
    pub(crate) async fn chat_snapshot(&self) -> (Vec<ChatMessage>, ChatContext) {
        let state = self.state.lock().await;
        let step = self.recipe.step(state.current_step);
        let context = ChatContext {
            recipe_name: self.recipe.name.clone(),
            current_step: state.current_step + 1,
            step_instruction: step.instruction.clone(),
        };
        (state.transcript.clone(), context)
    }

    // Internal plumbing

    /// Arm the countdown task when the timer should run, disarm it when it
    /// should not. Called after every mutation that can change the answer.
    async fn sync_timer_task(&self) {
        let should_run = {
            let state = self.state.lock().await;
            state.timer_running && !state.paused && !state.completed
        };

        let mut task = self.timer_task.lock().await;
        if should_run {
            if task.as_ref().map_or(false, |t| !t.is_finished()) {
                return;
            }

            let state = Arc::clone(&self.state);
            let interval = self.config.tick_interval;
            *task = Some(tokio::spawn(async move {
                loop {
                    tokio::time::sleep(interval).await;
                    let mut state = state.lock().await;
                    match state.tick() {
                        TickOutcome::Counting => {}
                        TickOutcome::Expired => {
                            info!("Step timer finished");
                            break;
                        }
                        TickOutcome::Skipped => break,
                    }
                }
            }));
        } else if let Some(task) = task.take() {
            task.abort();
        }
    }

    /// Read the current step aloud, fire-and-forget. Skipped while capture is
    /// active (the speech service is single-stream); narration failures are
    /// logged and never affect session state.
    async fn announce_current_step(&self) {
        let (listening, text) = {
            let state = self.state.lock().await;
            let step = self.recipe.step(state.current_step);
            (
                state.listening,
                format!(
                    "Step {}: {}. {}",
                    state.current_step + 1,
                    step.title,
                    step.instruction
                ),
            )
        };

        if listening {
            debug!("Skipping step narration while capture is active");
            return;
        }

        let speech = Arc::clone(&self.speech);
        tokio::spawn(async move {
            if let Err(e) = speech.speak(&text).await {
                warn!("Step narration failed: {}", e);
            }
        });
    }

    async fn log_step(&self) {
        let state = self.state.lock().await;
        info!(
            "Session {} now on step {}/{}: {}",
            self.config.session_id,
            state.current_step + 1,
            self.recipe.len(),
            self.recipe.step(state.current_step).title
        );
    }
}
