//! Clock-driven stand-in for a video element.
//!
//! Advances a playback position while playing and stops at the end of the
//! media. Used by the interactive CLI in place of a real player.

use super::VideoSurface;

#[derive(Debug, Clone)]
pub struct SimulatedSurface {
    position: f64,
    duration: f64,
    playing: bool,
}

impl SimulatedSurface {
    pub fn new(duration: f64) -> Self {
        Self {
            position: 0.0,
            duration: duration.max(0.0),
            playing: false,
        }
    }

    /// Advance the clock by `dt` seconds. Returns the new position if the
    /// surface is playing, i.e. if a time report should be emitted.
    pub fn advance(&mut self, dt: f64) -> Option<f64> {
        if !self.playing {
            return None;
        }

        self.position = (self.position + dt).min(self.duration);
        if self.position >= self.duration {
            self.playing = false;
        }
        Some(self.position)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.duration
    }
}

impl VideoSurface for SimulatedSurface {
    fn name(&self) -> &str {
        "simulated"
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing && !self.is_finished();
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
    }
}
