//! Quiz questions and submitted answers.
//!
//! A question's kind is carried by its [`Expected`] variant, so options only
//! exist on the kinds that need them and the expected answer is always typed
//! for its kind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four supported question kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Pick one option by index
    MultipleChoice,

    /// Answer true or false
    TrueFalse,

    /// Free text, compared case-insensitively
    ShortAnswer,

    /// Arrange the options into the canonical order
    Ordering,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::TrueFalse => write!(f, "true-false"),
            QuestionKind::ShortAnswer => write!(f, "short-answer"),
            QuestionKind::Ordering => write!(f, "ordering"),
        }
    }
}

/// A scripted question shown at a point in the lesson video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the catalog
    pub id: String,

    /// Seconds into the video at which the question triggers
    pub time: f64,

    /// Display text
    pub prompt: String,

    /// Kind, options and expected answer
    #[serde(flatten)]
    pub expected: Expected,

    /// Shown on a correct answer
    pub explanation: String,

    /// Shown on an incorrect answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrong_hints: Option<WrongHints>,
}

/// Expected answer, tagged by question kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Expected {
    MultipleChoice {
        options: Vec<String>,
        /// Index into `options`
        answer: usize,
    },
    TrueFalse {
        answer: bool,
    },
    ShortAnswer {
        answer: String,
    },
    Ordering {
        options: Vec<String>,
        /// Canonical order of option indices; `0..n` when omitted
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<Vec<usize>>,
    },
}

/// Hint text for wrong answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrongHints {
    /// One message for any wrong answer
    Uniform(String),

    /// One message per option, indexed by the submitted option (multiple-choice only)
    PerOption(Vec<String>),
}

/// An answer submitted by the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// Selected option index (multiple-choice)
    Choice(usize),

    /// Selected truth value (true-false)
    TrueFalse(bool),

    /// Typed text (short-answer)
    Text(String),

    /// Option indices in the order the learner arranged them (ordering)
    Order(Vec<usize>),
}

impl Answer {
    /// The question kind this answer shape belongs to
    pub fn kind(&self) -> QuestionKind {
        match self {
            Answer::Choice(_) => QuestionKind::MultipleChoice,
            Answer::TrueFalse(_) => QuestionKind::TrueFalse,
            Answer::Text(_) => QuestionKind::ShortAnswer,
            Answer::Order(_) => QuestionKind::Ordering,
        }
    }
}

/// Structural problems with a question definition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuestionDefect {
    #[error("{kind} question has no options")]
    NoOptions { kind: QuestionKind },

    #[error("answer index {answer} is out of range for {options} options")]
    AnswerOutOfRange { answer: usize, options: usize },

    #[error("canonical order {order:?} is not a permutation of 0..{options}")]
    NotAPermutation { order: Vec<usize>, options: usize },

    #[error("per-option hints are only valid for multiple-choice, not {kind}")]
    PerOptionHintsOnWrongKind { kind: QuestionKind },

    #[error("question time {time} is not a finite, non-negative number")]
    InvalidTime { time: f64 },
}

impl Question {
    /// The kind of this question
    pub fn kind(&self) -> QuestionKind {
        match self.expected {
            Expected::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Expected::TrueFalse { .. } => QuestionKind::TrueFalse,
            Expected::ShortAnswer { .. } => QuestionKind::ShortAnswer,
            Expected::Ordering { .. } => QuestionKind::Ordering,
        }
    }

    /// Options for multiple-choice and ordering questions
    pub fn options(&self) -> Option<&[String]> {
        match &self.expected {
            Expected::MultipleChoice { options, .. } | Expected::Ordering { options, .. } => {
                Some(options)
            }
            _ => None,
        }
    }

    /// The whole second this question is indexed under
    pub fn second(&self) -> i64 {
        self.time.floor() as i64
    }

    /// Canonical order for an ordering question
    pub fn canonical_order(&self) -> Option<Vec<usize>> {
        match &self.expected {
            Expected::Ordering { options, answer } => Some(
                answer
                    .clone()
                    .unwrap_or_else(|| (0..options.len()).collect()),
            ),
            _ => None,
        }
    }

    /// The expected answer shaped as a learner submission
    pub fn correct_answer(&self) -> Answer {
        match &self.expected {
            Expected::MultipleChoice { answer, .. } => Answer::Choice(*answer),
            Expected::TrueFalse { answer } => Answer::TrueFalse(*answer),
            Expected::ShortAnswer { answer } => Answer::Text(answer.clone()),
            Expected::Ordering { options, answer } => Answer::Order(
                answer
                    .clone()
                    .unwrap_or_else(|| (0..options.len()).collect()),
            ),
        }
    }

    /// Check the definition for structural problems
    pub fn check(&self) -> Result<(), QuestionDefect> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(QuestionDefect::InvalidTime { time: self.time });
        }

        match &self.expected {
            Expected::MultipleChoice { options, answer } => {
                if options.is_empty() {
                    return Err(QuestionDefect::NoOptions { kind: self.kind() });
                }
                if *answer >= options.len() {
                    return Err(QuestionDefect::AnswerOutOfRange {
                        answer: *answer,
                        options: options.len(),
                    });
                }
            }
            Expected::Ordering { options, answer } => {
                if options.is_empty() {
                    return Err(QuestionDefect::NoOptions { kind: self.kind() });
                }
                if let Some(order) = answer {
                    if !is_permutation(order, options.len()) {
                        return Err(QuestionDefect::NotAPermutation {
                            order: order.clone(),
                            options: options.len(),
                        });
                    }
                }
            }
            Expected::TrueFalse { .. } | Expected::ShortAnswer { .. } => {}
        }

        if matches!(self.wrong_hints, Some(WrongHints::PerOption(_)))
            && self.kind() != QuestionKind::MultipleChoice
        {
            return Err(QuestionDefect::PerOptionHintsOnWrongKind { kind: self.kind() });
        }

        Ok(())
    }
}

/// True if `order` contains each of `0..len` exactly once
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
