//! Playback position tracking.
//!
//! Turns the near-continuous stream of time reports from the video surface
//! into "entered a new whole second" signals for the scheduler.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Sentinel below any valid second, so the first report is always evaluated
pub const UNPROCESSED: i64 = -1;

/// How backward jumps in reported time are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackwardSeekPolicy {
    /// Reports earlier than the previous one are skipped, and a second is
    /// only evaluated once it passes the highest second already processed.
    /// Rewinding never re-arms a question that was already shown.
    #[default]
    Strict,

    /// Any change of whole second is evaluated, including after a rewind.
    Relaxed,
}

/// Tracks reported playback time and the last evaluated second
#[derive(Debug, Clone)]
pub struct PlaybackTracker {
    policy: BackwardSeekPolicy,
    current_time: f64,
    previous_time: f64,
    last_processed_second: i64,
}

impl PlaybackTracker {
    pub fn new(policy: BackwardSeekPolicy) -> Self {
        Self {
            policy,
            current_time: 0.0,
            previous_time: 0.0,
            last_processed_second: UNPROCESSED,
        }
    }

    /// Observe a time report. Returns the second to evaluate against the
    /// question index, or `None` if this report must not trigger anything.
    pub fn observe(&mut self, current_time: f64) -> Option<i64> {
        if !current_time.is_finite() {
            debug!(current_time, "Ignoring non-finite time report");
            return None;
        }

        self.current_time = current_time;
        let second = current_time.floor() as i64;
        let backward = current_time < self.previous_time;

        let entered = if second == self.last_processed_second {
            None
        } else {
            match self.policy {
                BackwardSeekPolicy::Strict if backward => None,
                BackwardSeekPolicy::Strict if second < self.last_processed_second => None,
                _ => {
                    self.last_processed_second = second;
                    Some(second)
                }
            }
        };

        trace!(current_time, second, backward, ?entered, "Time report");

        self.previous_time = current_time;
        entered
    }

    /// Back to the state of a freshly loaded lesson
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.previous_time = 0.0;
        self.last_processed_second = UNPROCESSED;
    }

    /// Last reported playback position
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Playback position reported before the current one
    pub fn previous_time(&self) -> f64 {
        self.previous_time
    }

    /// Last whole second evaluated against the index
    pub fn last_processed_second(&self) -> i64 {
        self.last_processed_second
    }

    pub fn policy(&self) -> BackwardSeekPolicy {
        self.policy
    }
}
