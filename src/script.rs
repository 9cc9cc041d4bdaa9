//! Scripted playback sessions.
//!
//! A script is a YAML list of steps replayed through a [`Controller`] with a
//! recording surface and a virtual clock, so timing-dependent behavior such
//! as the seek-clear debounce is reproducible.
//!
//! ```yaml
//! lesson: turkey-handling
//! steps:
//!   - start
//!   - times: [1.0, 1.9, 2.0]
//!   - answer: { true_false: true }
//!   - watch_again
//!   - wait: 150
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::catalog::{Catalog, CatalogError};
use crate::core::{Controller, QuizState, SessionSettings};
use crate::domain::{Answer, LessonId, SessionEvent};
use crate::surface::{RecordingSurface, SurfaceCommand};

/// Errors that can occur loading or running a script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Lesson not found: {0}")]
    UnknownLesson(LessonId),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Script parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A scripted session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Lesson to open (catalog default if omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<LessonId>,

    /// Steps with values are written as single-key maps (`- time: 2.0`)
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<ScriptStep>,
}

/// One scripted input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    /// Press "start lesson"
    Start,

    /// One time report, in seconds
    Time(f64),

    /// Several time reports in order
    Times(Vec<f64>),

    /// Submit an answer
    Answer(Answer),

    /// Press "continue"
    Continue,

    /// Close the question overlay
    Dismiss,

    /// Press "watch again"
    WatchAgain,

    /// Advance the virtual clock by milliseconds
    Wait(u64),

    /// Play attempt from the surface's own controls
    Play,

    /// Navigate to another lesson
    Lesson(LessonId),
}

impl Script {
    pub fn from_yaml(content: &str) -> Result<Self, ScriptError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// Outcome of a scripted run
#[derive(Debug, Clone)]
pub struct ScriptReport {
    /// Lesson open when the script finished
    pub lesson_id: LessonId,

    pub final_state: QuizState,

    /// Session events in order
    pub events: Vec<SessionEvent>,

    /// Commands received by the surface in order
    pub commands: Vec<SurfaceCommand>,

    /// Virtual time the script took
    pub elapsed: Duration,
}

/// Replay a script. `lesson` overrides the script's own lesson.
#[instrument(skip(catalog, settings, script), fields(steps = script.steps.len()))]
pub fn run_script(
    catalog: Arc<Catalog>,
    settings: SessionSettings,
    script: &Script,
    lesson: Option<&LessonId>,
) -> Result<ScriptReport, ScriptError> {
    let mut controller = match lesson.or(script.lesson.as_ref()) {
        Some(id) => Controller::with_lesson(catalog, id, settings)
            .ok_or_else(|| ScriptError::UnknownLesson(id.clone()))?,
        None => Controller::new(catalog, settings)?,
    };
    controller.mount(RecordingSurface::new());

    let origin = Instant::now();
    let mut elapsed = Duration::ZERO;

    for step in &script.steps {
        let now = origin + elapsed;
        debug!(?step, elapsed_ms = elapsed.as_millis() as u64, "Script step");

        match step {
            ScriptStep::Start => controller.start(),
            ScriptStep::Time(t) => {
                controller.on_time_update(*t);
            }
            ScriptStep::Times(times) => {
                for t in times {
                    controller.on_time_update(*t);
                }
            }
            ScriptStep::Answer(answer) => {
                controller.submit(answer.clone());
            }
            ScriptStep::Continue => {
                controller.continue_playback();
            }
            ScriptStep::Dismiss => {
                controller.dismiss();
            }
            ScriptStep::WatchAgain => {
                controller.watch_again(now);
            }
            ScriptStep::Wait(ms) => {
                elapsed += Duration::from_millis(*ms);
            }
            ScriptStep::Play => {
                controller.on_play_attempt();
            }
            ScriptStep::Lesson(id) => {
                controller.select_lesson(id);
            }
        }

        controller.poll(origin + elapsed);
    }

    let commands = controller
        .surface_mut()
        .map(|s| s.take_commands())
        .unwrap_or_default();

    Ok(ScriptReport {
        lesson_id: controller.session().lesson().id.clone(),
        final_state: controller.state(),
        events: controller.take_events(),
        commands,
        elapsed,
    })
}
