//! Whole-second question index.
//!
//! Maps `floor(question.time)` to the question's position in its lesson.
//! When two questions share a floor-second the one later in authoring order
//! wins and the earlier one is unreachable.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::domain::{Lesson, Question};

/// Index of a lesson's questions by trigger second
#[derive(Debug, Clone)]
pub struct QuestionIndex {
    lesson: Arc<Lesson>,
    by_second: HashMap<i64, usize>,
}

impl QuestionIndex {
    /// Build the index for a lesson
    pub fn build(lesson: Arc<Lesson>) -> Self {
        let mut by_second = HashMap::with_capacity(lesson.questions.len());

        for (pos, question) in lesson.questions.iter().enumerate() {
            if let Some(shadowed) = by_second.insert(question.second(), pos) {
                warn!(
                    lesson = %lesson.id,
                    second = question.second(),
                    shadowed = %lesson.questions[shadowed].id,
                    winner = %question.id,
                    "Questions share a trigger second; earlier one is unreachable"
                );
            }
        }

        Self { lesson, by_second }
    }

    /// Rebuild unless this index was built for the same lesson instance.
    /// Returns true if the index was rebuilt.
    pub fn rebuild_for(&mut self, lesson: Arc<Lesson>) -> bool {
        if Arc::ptr_eq(&self.lesson, &lesson) {
            return false;
        }
        *self = Self::build(lesson);
        true
    }

    /// The lesson this index was built from
    pub fn lesson(&self) -> &Arc<Lesson> {
        &self.lesson
    }

    /// Position of the question that triggers at `second`
    pub fn position(&self, second: i64) -> Option<usize> {
        self.by_second.get(&second).copied()
    }

    /// The question that triggers at `second`
    pub fn get(&self, second: i64) -> Option<&Question> {
        self.position(second).map(|pos| &self.lesson.questions[pos])
    }

    /// Number of reachable questions
    pub fn len(&self) -> usize {
        self.by_second.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_second.is_empty()
    }
}
