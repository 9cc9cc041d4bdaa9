//! lessonquiz - Timed quiz questions for video lessons
//!
//! Plays a lesson video, pauses at scripted timestamps to ask a question,
//! grades the answer and either resumes playback or rewinds a few seconds
//! for another look.
//!
//! # Architecture
//!
//! The system is built around a single-threaded session state machine:
//! - Time reports from the video surface are reduced to whole seconds
//! - Each newly entered second is looked up in the lesson's question index
//! - A match pauses playback and asks the question until it is answered
//!   correctly, dismissed, or the learner chooses to watch again
//!
//! # Modules
//!
//! - `catalog`: Curriculum of modules and lessons (YAML, built-in demo)
//! - `core`: Scheduling and grading (QuestionIndex, PlaybackTracker, Grader, QuizSession, Controller)
//! - `domain`: Data structures (Question, Answer, Lesson, Feedback, SessionEvent)
//! - `surface`: Video surface trait and implementations
//! - `script`: Deterministic replay of scripted sessions
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List lessons
//! lessonquiz lessons
//!
//! # Play the default lesson in the terminal
//! lessonquiz play
//!
//! # Replay a scripted session
//! lessonquiz run-script session.yaml --json
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod script;
pub mod surface;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, CatalogError};
pub use core::{grade, Controller, Grader, QuizSession, QuizState, SessionSettings};
pub use domain::{Answer, Feedback, Lesson, LessonId, Question, QuestionKind, SessionEvent};
pub use script::{run_script, Script, ScriptStep};
pub use surface::{RecordingSurface, SimulatedSurface, VideoSurface};
