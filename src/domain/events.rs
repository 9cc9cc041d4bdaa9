//! Session events.
//!
//! Every state transition of a quiz session is recorded as an event in the
//! session's outbox. Callers drain the outbox to render transcripts or to
//! assert on behavior in tests.

use serde::{Deserialize, Serialize};

use super::lesson::LessonId;

/// A single recorded transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Lesson the session was viewing
    pub lesson_id: LessonId,

    /// Last reported playback position when the event occurred
    pub media_time: f64,

    /// What happened
    #[serde(flatten)]
    pub kind: SessionEventKind,
}

impl SessionEvent {
    pub fn new(lesson_id: LessonId, media_time: f64, kind: SessionEventKind) -> Self {
        Self {
            lesson_id,
            media_time,
            kind,
        }
    }
}

/// Types of session events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEventKind {
    /// A lesson was loaded and transient state reset
    LessonLoaded,

    /// The learner pressed start
    PlaybackStarted,

    /// Playback crossed a scripted second and a question was asked
    QuestionActivated { question_id: String, second: i64 },

    /// A submission was graded
    AnswerGraded {
        question_id: String,
        correct: bool,
        message: String,
    },

    /// The active question was closed and playback resumed
    QuestionDismissed { question_id: String },

    /// "Watch again" rewound playback
    ReplayRequested { target: f64 },

    /// The pending seek was consumed and cleared
    SeekCleared,

    /// A play attempt was rejected while a question was active
    PlayVetoed { question_id: String },
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:>7.2}s] ", self.media_time)?;
        match &self.kind {
            SessionEventKind::LessonLoaded => write!(f, "lesson loaded: {}", self.lesson_id),
            SessionEventKind::PlaybackStarted => write!(f, "playback started"),
            SessionEventKind::QuestionActivated {
                question_id,
                second,
            } => write!(f, "question {} asked at second {}", question_id, second),
            SessionEventKind::AnswerGraded {
                question_id,
                correct,
                message,
            } => write!(
                f,
                "answer to {} {}: {}",
                question_id,
                if *correct { "correct" } else { "incorrect" },
                message
            ),
            SessionEventKind::QuestionDismissed { question_id } => {
                write!(f, "question {} dismissed, playback resumed", question_id)
            }
            SessionEventKind::ReplayRequested { target } => {
                write!(f, "watch again: seeking to {:.2}s", target)
            }
            SessionEventKind::SeekCleared => write!(f, "pending seek cleared"),
            SessionEventKind::PlayVetoed { question_id } => {
                write!(f, "play blocked while {} is active", question_id)
            }
        }
    }
}
