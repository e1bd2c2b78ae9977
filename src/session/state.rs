use crate::chat::ChatMessage;
use crate::recipe::Recipe;

/// Result of a step transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Moved to a different step
    Moved,
    /// The final step was finished; the session is now complete
    Finished,
    /// Nothing changed (boundary hit or session already complete)
    Unchanged,
}

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// Counted down by one second
    Counting,
    /// Reached zero; the countdown stopped
    Expired,
    /// Ignored (timer stopped, paused, or session complete)
    Skipped,
}

/// Mutable state of one cook-along run.
///
/// All transitions live here so they can be exercised without the async
/// plumbing around them. `current_step` always stays inside the recipe;
/// out-of-range requests are no-ops, never errors. Once `completed` is set
/// the state is terminal and every transition is ignored.
pub(crate) struct SessionState {
    pub current_step: usize,
    pub remaining_seconds: u32,
    pub timer_running: bool,
    pub paused: bool,
    pub listening: bool,
    pub tip_open: bool,
    pub transcript: Vec<ChatMessage>,
    pub chat_loading: bool,
    pub last_voice_feedback: Option<String>,
    pub completed: bool,
}

impl SessionState {
    pub fn new(recipe: &Recipe) -> Self {
        Self {
            current_step: 0,
            remaining_seconds: recipe.step(0).timer_seconds,
            timer_running: false,
            paused: false,
            listening: false,
            tip_open: false,
            transcript: Vec::new(),
            chat_loading: false,
            last_voice_feedback: None,
            completed: false,
        }
    }

    /// Move to the next step, or finish the session on the last one.
    ///
    /// Completion is only reachable while the session is not paused.
    pub fn advance(&mut self, recipe: &Recipe) -> StepOutcome {
        if self.completed {
            return StepOutcome::Unchanged;
        }

        if recipe.is_last(self.current_step) {
            if self.paused {
                return StepOutcome::Unchanged;
            }
            self.completed = true;
            self.timer_running = false;
            StepOutcome::Finished
        } else {
            self.current_step += 1;
            self.enter_step(recipe);
            StepOutcome::Moved
        }
    }

    /// Move back one step; a no-op on the first step.
    pub fn retreat(&mut self, recipe: &Recipe) -> StepOutcome {
        if self.completed || self.current_step == 0 {
            return StepOutcome::Unchanged;
        }

        self.current_step -= 1;
        self.enter_step(recipe);
        StepOutcome::Moved
    }

    /// Flip the countdown. Starting with nothing left on the clock is a
    /// no-op; the countdown must be reloaded by a step change or an explicit
    /// timer request first.
    pub fn toggle_timer(&mut self) {
        if self.completed {
            return;
        }
        if !self.timer_running && self.remaining_seconds == 0 {
            return;
        }
        self.timer_running = !self.timer_running;
    }

    /// Count down one second, floored at zero. Pausing freezes elapsed time
    /// exactly: ticks while paused leave the state untouched.
    pub fn tick(&mut self) -> TickOutcome {
        if self.completed || !self.timer_running || self.paused {
            return TickOutcome::Skipped;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.timer_running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Counting
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.completed {
            return;
        }
        self.paused = paused;
    }

    /// Load an explicit countdown and start it.
    pub fn set_timer(&mut self, seconds: u32) {
        if self.completed {
            return;
        }
        self.remaining_seconds = seconds;
        self.timer_running = true;
    }

    /// Back to step one with a fresh timer. The chat transcript survives a
    /// restart.
    pub fn restart(&mut self, recipe: &Recipe) {
        if self.completed {
            return;
        }
        self.current_step = 0;
        self.enter_step(recipe);
        self.paused = false;
    }

    fn enter_step(&mut self, recipe: &Recipe) {
        self.remaining_seconds = recipe.step(self.current_step).timer_seconds;
        self.timer_running = false;
        self.tip_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_state() -> (SessionState, Recipe) {
        let recipe = Recipe::demo();
        let state = SessionState::new(&recipe);
        (state, recipe)
    }

    #[test]
    fn test_initial_state() {
        let (state, recipe) = demo_state();

        assert_eq!(state.current_step, 0);
        assert_eq!(state.remaining_seconds, recipe.step(0).timer_seconds);
        assert!(!state.timer_running);
        assert!(!state.paused);
        assert!(!state.completed);
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_advance_resets_timer_and_tip() {
        let (mut state, recipe) = demo_state();
        state.timer_running = true;
        state.tip_open = true;

        assert_eq!(state.advance(&recipe), StepOutcome::Moved);
        assert_eq!(state.current_step, 1);
        assert_eq!(state.remaining_seconds, recipe.step(1).timer_seconds);
        assert!(!state.timer_running);
        assert!(!state.tip_open);
    }

    #[test]
    fn test_advance_past_last_step_completes_once() {
        let (mut state, recipe) = demo_state();
        let last = recipe.len() - 1;

        for _ in 0..last {
            assert_eq!(state.advance(&recipe), StepOutcome::Moved);
        }
        assert_eq!(state.current_step, last);

        assert_eq!(state.advance(&recipe), StepOutcome::Finished);
        assert!(state.completed);
        assert_eq!(state.current_step, last, "index must not move past bounds");

        // terminal: further transitions are ignored
        assert_eq!(state.advance(&recipe), StepOutcome::Unchanged);
        assert_eq!(state.retreat(&recipe), StepOutcome::Unchanged);
    }

    #[test]
    fn test_retreat_at_first_step_is_noop() {
        let (mut state, recipe) = demo_state();

        assert_eq!(state.retreat(&recipe), StepOutcome::Unchanged);
        assert_eq!(state.current_step, 0);
        assert_eq!(state.remaining_seconds, recipe.step(0).timer_seconds);
    }

    #[test]
    fn test_advance_on_last_step_while_paused_is_noop() {
        let (mut state, recipe) = demo_state();
        for _ in 0..recipe.len() - 1 {
            state.advance(&recipe);
        }
        state.set_paused(true);

        assert_eq!(state.advance(&recipe), StepOutcome::Unchanged);
        assert!(!state.completed);
    }

    #[test]
    fn test_tick_floors_at_zero_and_stops_timer() {
        let (mut state, recipe) = demo_state();
        state.set_timer(2);

        assert_eq!(state.tick(), TickOutcome::Counting);
        assert_eq!(state.remaining_seconds, 1);
        assert_eq!(state.tick(), TickOutcome::Expired);
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.timer_running);

        // stopped at zero: further ticks change nothing
        assert_eq!(state.tick(), TickOutcome::Skipped);
        assert_eq!(state.remaining_seconds, 0);

        // and the timer cannot be restarted from zero by a toggle
        state.toggle_timer();
        assert!(!state.timer_running);
        let _ = recipe;
    }

    #[test]
    fn test_pause_is_lossless() {
        let (mut state, _recipe) = demo_state();
        state.set_timer(120);
        state.tick();
        let frozen = state.remaining_seconds;

        state.set_paused(true);
        for _ in 0..10 {
            assert_eq!(state.tick(), TickOutcome::Skipped);
        }
        assert_eq!(state.remaining_seconds, frozen);

        state.set_paused(false);
        assert_eq!(state.tick(), TickOutcome::Counting);
        assert_eq!(state.remaining_seconds, frozen - 1);
    }

    #[test]
    fn test_set_timer_overrides_prior_state() {
        let (mut state, _recipe) = demo_state();
        state.toggle_timer();
        state.tick();

        state.set_timer(300);
        assert_eq!(state.remaining_seconds, 300);
        assert!(state.timer_running);
    }

    #[test]
    fn test_restart_keeps_transcript() {
        let (mut state, recipe) = demo_state();
        state.advance(&recipe);
        state.advance(&recipe);
        state.set_paused(true);
        state.transcript.push(ChatMessage::user("how hot is medium-low?"));

        state.restart(&recipe);

        assert_eq!(state.current_step, 0);
        assert_eq!(state.remaining_seconds, recipe.step(0).timer_seconds);
        assert!(!state.timer_running);
        assert!(!state.paused);
        assert_eq!(state.transcript.len(), 1, "chat history survives a restart");
    }
}
