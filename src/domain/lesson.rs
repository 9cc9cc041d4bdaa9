//! Lessons and curriculum modules.
//!
//! Lessons are immutable once loaded; a session holds them behind an `Arc`
//! so the question index can be cached against the lesson's identity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::question::Question;

/// Lesson identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single video unit with its scripted questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Video length in seconds
    pub duration: u32,

    /// Playable media locator (may be empty for placeholder lessons)
    #[serde(default)]
    pub video_src: String,

    /// Questions in authoring order
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Lesson {
    /// Get a question by ID
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Whether there is media to play
    pub fn has_video(&self) -> bool {
        !self.video_src.trim().is_empty()
    }
}

/// A group of lessons in the curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumModule {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Short marker shown before the title in listings
    #[serde(default)]
    pub icon: String,

    /// Placeholder modules are listed but have no playable content
    #[serde(default = "default_implemented")]
    pub implemented: bool,

    #[serde(default)]
    pub learning_objectives: Vec<String>,

    /// Shared so sessions can hold a lesson without copying it
    pub lessons: Vec<Arc<Lesson>>,
}

fn default_implemented() -> bool {
    true
}
