//! Core scheduling and grading logic.
//!
//! This module contains:
//! - QuestionIndex: Whole-second lookup of a lesson's questions
//! - PlaybackTracker: Detection of newly entered seconds
//! - Grader: Answer validation and feedback selection
//! - QuizSession: The question/answer state machine
//! - Controller: Session plus video surface

pub mod controller;
pub mod grader;
pub mod index;
pub mod session;
pub mod settings;
pub mod timer;
pub mod tracker;

// Re-export commonly used types
pub use controller::Controller;
pub use grader::{grade, is_correct, Grader};
pub use index::QuestionIndex;
pub use session::{QuizSession, QuizState};
pub use settings::{SessionSettings, DEFAULT_FALLBACK_HINT};
pub use timer::Debounce;
pub use tracker::{BackwardSeekPolicy, PlaybackTracker, UNPROCESSED};
