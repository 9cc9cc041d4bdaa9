//! Video surface interfaces.
//!
//! A surface is the playback element: it accepts play/pause intent and
//! one-shot seeks, and reports the current time back through the
//! controller. Play attempts that originate on the surface itself (native
//! controls) are routed through [`crate::core::Controller::on_play_attempt`]
//! so the session can veto them while a question is active.

pub mod recording;
pub mod simulated;

pub use recording::{RecordingSurface, SurfaceCommand};
pub use simulated::SimulatedSurface;

/// Trait for playback elements driven by the controller
pub trait VideoSurface {
    /// Human-readable surface name
    fn name(&self) -> &str;

    /// Apply play (`true`) or pause (`false`) intent. Must be idempotent.
    fn set_playing(&mut self, playing: bool);

    /// Jump to a position in seconds
    fn seek(&mut self, seconds: f64);
}
