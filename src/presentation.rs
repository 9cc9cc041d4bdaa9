//! Text rendering of questions and parsing of typed answers.
//!
//! Ordering questions are shown in a shuffled order; answers typed against
//! the shuffled display are mapped back to original option indices before
//! grading.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Answer, Question, QuestionKind};

/// Display order of a question's options (identity unless shuffled)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOrder(Vec<usize>);

impl DisplayOrder {
    /// Options in authoring order
    pub fn identity(question: &Question) -> Self {
        Self((0..question.options().map_or(0, |o| o.len())).collect())
    }

    /// Shuffle ordering questions; other kinds keep authoring order
    pub fn for_question<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let mut order = Self::identity(question);
        if question.kind() == QuestionKind::Ordering {
            order.0.shuffle(rng);
        }
        order
    }

    /// Original option index shown at display position `pos`
    pub fn original(&self, pos: usize) -> Option<usize> {
        self.0.get(pos).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Render a question as terminal text
pub fn render_question(question: &Question, order: &DisplayOrder) -> String {
    let mut out = format!("{}\n", question.prompt);

    match question.kind() {
        QuestionKind::MultipleChoice | QuestionKind::Ordering => {
            let options = question.options().unwrap_or_default();
            for (pos, &original) in order.as_slice().iter().enumerate() {
                if let Some(option) = options.get(original) {
                    out.push_str(&format!("  {}) {}\n", pos + 1, option));
                }
            }
            if question.kind() == QuestionKind::Ordering {
                out.push_str("Enter the numbers in the correct order, separated by commas.\n");
            } else {
                out.push_str("Enter the number of your answer.\n");
            }
        }
        QuestionKind::TrueFalse => out.push_str("Enter true or false.\n"),
        QuestionKind::ShortAnswer => out.push_str("Type your answer.\n"),
    }

    out
}

/// Parse typed input into an answer for `question`. Returns `None` when the
/// input cannot be an answer (empty, out of range, malformed).
pub fn parse_answer(question: &Question, input: &str, order: &DisplayOrder) -> Option<Answer> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match question.kind() {
        QuestionKind::MultipleChoice => {
            let pos = parse_position(input)?;
            order.original(pos).map(Answer::Choice)
        }
        QuestionKind::TrueFalse => match input.to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" => Some(Answer::TrueFalse(true)),
            "false" | "f" | "no" | "n" => Some(Answer::TrueFalse(false)),
            _ => None,
        },
        QuestionKind::ShortAnswer => Some(Answer::Text(input.to_string())),
        QuestionKind::Ordering => {
            let indices = input
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| parse_position(part).and_then(|pos| order.original(pos)))
                .collect::<Option<Vec<_>>>()?;
            Some(Answer::Order(indices))
        }
    }
}

/// 1-based display position to 0-based index
fn parse_position(s: &str) -> Option<usize> {
    s.trim().parse::<usize>().ok()?.checked_sub(1)
}
