//! Surface that records every command it receives.

use serde::Serialize;

use super::VideoSurface;

/// A command sent to the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "at")]
pub enum SurfaceCommand {
    Play,
    Pause,
    Seek(f64),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drain recorded commands
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Seeks received so far
    pub fn seeks(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SurfaceCommand::Seek(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl VideoSurface for RecordingSurface {
    fn name(&self) -> &str {
        "recording"
    }

    fn set_playing(&mut self, playing: bool) {
        self.commands.push(if playing {
            SurfaceCommand::Play
        } else {
            SurfaceCommand::Pause
        });
    }

    fn seek(&mut self, seconds: f64) {
        self.commands.push(SurfaceCommand::Seek(seconds));
    }
}
