//! Lesson catalog.
//!
//! The curriculum is a read-only list of modules, each holding ordered
//! lessons, loaded wholesale from YAML. A demo curriculum is embedded in the
//! binary and used when no catalog file is configured.
//!
//! # File Layout
//!
//! ```yaml
//! version: 1
//! default_lesson: turkey-handling
//! modules:
//!   - id: module-4
//!     title: Turkey Processing & Slaughter
//!     lessons:
//!       - id: turkey-handling
//!         title: Live Bird Handling & Welfare
//!         duration: 180
//!         video_src: https://...
//!         questions:
//!           - id: handling-1
//!             time: 2
//!             kind: true-false
//!             prompt: ...
//!             answer: false
//!             explanation: ...
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CurriculumModule, Lesson, LessonId, QuestionDefect};

const BUILTIN_CATALOG: &str = include_str!("demo.yaml");

/// Catalog validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Catalog contains no lessons")]
    Empty,

    #[error("Duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("Duplicate question id '{question}' in lesson {lesson}")]
    DuplicateQuestion { lesson: LessonId, question: String },

    #[error("Default lesson not found: {0}")]
    UnknownDefault(LessonId),

    #[error("Question '{question}' in lesson {lesson}: {defect}")]
    InvalidQuestion {
        lesson: LessonId,
        question: String,
        defect: QuestionDefect,
    },

    #[error("Question '{question}' at {time}s is past the end of lesson {lesson} ({duration}s)")]
    QuestionPastEnd {
        lesson: LessonId,
        question: String,
        time: f64,
        duration: u32,
    },
}

/// The full curriculum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Lesson to open when none is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_lesson: Option<LessonId>,

    /// Curriculum modules in display order
    pub modules: Vec<CurriculumModule>,
}

fn default_version() -> u32 {
    1
}

impl Catalog {
    /// Create a catalog from modules
    pub fn new(modules: Vec<CurriculumModule>) -> Self {
        Self {
            version: default_version(),
            default_lesson: None,
            modules,
        }
    }

    /// The embedded demo curriculum
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG).context("Failed to parse built-in catalog")
    }

    /// Load a catalog from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))
    }

    /// Parse and validate a catalog from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(content).context("Failed to parse catalog YAML")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate the catalog definition
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut lesson_ids = HashSet::new();
        let mut any_lesson = false;

        for lesson in self.lessons() {
            any_lesson = true;

            if !lesson_ids.insert(&lesson.id) {
                return Err(CatalogError::DuplicateLesson(lesson.id.clone()));
            }

            let mut question_ids = HashSet::new();
            for question in &lesson.questions {
                if !question_ids.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestion {
                        lesson: lesson.id.clone(),
                        question: question.id.clone(),
                    });
                }

                question
                    .check()
                    .map_err(|defect| CatalogError::InvalidQuestion {
                        lesson: lesson.id.clone(),
                        question: question.id.clone(),
                        defect,
                    })?;

                if question.time > f64::from(lesson.duration) {
                    return Err(CatalogError::QuestionPastEnd {
                        lesson: lesson.id.clone(),
                        question: question.id.clone(),
                        time: question.time,
                        duration: lesson.duration,
                    });
                }
            }
        }

        if !any_lesson {
            return Err(CatalogError::Empty);
        }

        if let Some(ref id) = self.default_lesson {
            if !lesson_ids.contains(id) {
                return Err(CatalogError::UnknownDefault(id.clone()));
            }
        }

        Ok(())
    }

    /// All modules in display order
    pub fn modules(&self) -> &[CurriculumModule] {
        &self.modules
    }

    /// Get a module by ID
    pub fn module(&self, id: &str) -> Option<&CurriculumModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// All lessons across modules, in order
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.modules
            .iter()
            .flat_map(|m| m.lessons.iter().map(Arc::as_ref))
    }

    /// Get a lesson by ID
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons().find(|l| &l.id == id)
    }

    /// The starting lesson: the configured default, else the first lesson of
    /// the first implemented module, else the first lesson overall
    pub fn default_lesson(&self) -> Option<&Lesson> {
        if let Some(ref id) = self.default_lesson {
            if let Some(lesson) = self.lesson(id) {
                return Some(lesson);
            }
        }

        self.modules
            .iter()
            .filter(|m| m.implemented)
            .find_map(|m| m.lessons.first())
            .map(Arc::as_ref)
            .or_else(|| self.lessons().next())
    }

    /// Shared handle to a lesson. Repeated calls return the same instance.
    pub fn shared_lesson(&self, id: &LessonId) -> Option<Arc<Lesson>> {
        self.modules
            .iter()
            .flat_map(|m| m.lessons.iter())
            .find(|l| &l.id == id)
            .cloned()
    }

    /// Number of lessons across all modules
    pub fn lesson_count(&self) -> usize {
        self.lessons().count()
    }
}

/// Format seconds as `M:SS`
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
