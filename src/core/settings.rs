//! Tunable playback and grading behavior.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::tracker::BackwardSeekPolicy;

/// Hint shown when no specific wrong-answer hint applies
pub const DEFAULT_FALLBACK_HINT: &str = "Think about this more carefully.";

/// Settings for a quiz session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// How far "watch again" rewinds, in seconds (default: 4)
    #[serde(default = "default_replay_rewind")]
    pub replay_rewind_seconds: f64,

    /// How long a pending seek stays set before it is cleared (default: 100ms)
    #[serde(default = "default_seek_debounce")]
    pub seek_debounce_ms: u64,

    /// Treatment of backward jumps in reported time
    #[serde(default)]
    pub backward_seek: BackwardSeekPolicy,

    /// Generic wrong-answer message
    #[serde(default = "default_fallback_hint")]
    pub fallback_hint: String,
}

fn default_replay_rewind() -> f64 {
    4.0
}
fn default_seek_debounce() -> u64 {
    100
}
fn default_fallback_hint() -> String {
    DEFAULT_FALLBACK_HINT.to_string()
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            replay_rewind_seconds: default_replay_rewind(),
            seek_debounce_ms: default_seek_debounce(),
            backward_seek: BackwardSeekPolicy::default(),
            fallback_hint: default_fallback_hint(),
        }
    }
}

impl SessionSettings {
    /// Debounce window for clearing a pending seek
    pub fn seek_debounce(&self) -> Duration {
        Duration::from_millis(self.seek_debounce_ms)
    }
}
