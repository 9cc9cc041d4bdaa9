//! Domain types for lesson playback and quizzing.
//!
//! This module contains the core data structures:
//! - Question: Timestamped quiz question and submitted answers
//! - Lesson: Video lesson and curriculum module
//! - Feedback: Grading result
//! - Events: Records of session state transitions

pub mod events;
pub mod feedback;
pub mod lesson;
pub mod question;

// Re-export commonly used types
pub use events::{SessionEvent, SessionEventKind};
pub use feedback::Feedback;
pub use lesson::{CurriculumModule, Lesson, LessonId};
pub use question::{is_permutation, Answer, Expected, Question, QuestionDefect, QuestionKind, WrongHints};
