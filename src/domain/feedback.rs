//! Grading results.

use serde::{Deserialize, Serialize};

/// Result of grading one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Whether the submission matched the expected answer
    pub correct: bool,

    /// Explanation on success, hint on failure
    pub message: String,
}

impl Feedback {
    /// A correct verdict carrying the question's explanation
    pub fn correct(message: impl Into<String>) -> Self {
        Self {
            correct: true,
            message: message.into(),
        }
    }

    /// An incorrect verdict carrying a hint
    pub fn incorrect(message: impl Into<String>) -> Self {
        Self {
            correct: false,
            message: message.into(),
        }
    }
}
