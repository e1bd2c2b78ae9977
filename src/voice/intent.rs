use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A recognized voice command
///
/// Closed set: every captured utterance maps to exactly one of these, with
/// `Unknown` as the catch-all for anything the recognizer could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceIntent {
    /// Go to the next step
    Next,
    /// Go back one step
    Prev,
    /// Repeat the current instruction
    Repeat,
    /// Start a countdown; no duration means the current step's default
    Timer { duration_seconds: Option<u32> },
    /// Pause the session
    Pause,
    /// Resume the session
    Resume,
    /// List available commands
    Help,
    /// Not understood
    Unknown,
}

static PREFIXES: OnceLock<Vec<(Regex, VoiceIntent)>> = OnceLock::new();
static TIMER_RE: OnceLock<Regex> = OnceLock::new();

fn prefixes() -> &'static [(Regex, VoiceIntent)] {
    // Order matters: "go back" must hit Prev before "go" hits Resume.
    PREFIXES.get_or_init(|| {
        vec![
            (
                Regex::new(r"^(next|go next|next step)").expect("valid regex"),
                VoiceIntent::Next,
            ),
            (
                Regex::new(r"^(back|previous|prev|go back)").expect("valid regex"),
                VoiceIntent::Prev,
            ),
            (
                Regex::new(r"^(repeat|again|say that again)").expect("valid regex"),
                VoiceIntent::Repeat,
            ),
            (
                Regex::new(r"^(pause|stop|wait)").expect("valid regex"),
                VoiceIntent::Pause,
            ),
            (
                Regex::new(r"^(resume|continue|go)").expect("valid regex"),
                VoiceIntent::Resume,
            ),
            (
                Regex::new(r"^(help|commands|what can)").expect("valid regex"),
                VoiceIntent::Help,
            ),
        ]
    })
}

/// Classify a transcribed utterance into a voice command.
///
/// Navigation words are matched at the start of the utterance; a timer
/// duration ("5 min", "30 seconds") is picked up anywhere in it. A bare
/// "timer" request carries no duration and falls back to the current step's
/// default downstream.
pub fn parse_intent(text: &str) -> VoiceIntent {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return VoiceIntent::Unknown;
    }

    for (pattern, intent) in prefixes() {
        if pattern.is_match(&lower) {
            return intent.clone();
        }
    }

    let timer_re = TIMER_RE
        .get_or_init(|| Regex::new(r"(\d+)\s*(min|sec|minute|second)").expect("valid regex"));
    if let Some(caps) = timer_re.captures(&lower) {
        let seconds = caps[1].parse::<u32>().ok().map(|value| {
            if caps[2].starts_with("min") {
                value.saturating_mul(60)
            } else {
                value
            }
        });
        return VoiceIntent::Timer {
            duration_seconds: seconds,
        };
    }
    if lower.contains("timer") {
        return VoiceIntent::Timer {
            duration_seconds: None,
        };
    }

    VoiceIntent::Unknown
}
