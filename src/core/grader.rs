//! Answer grading.
//!
//! Grading is a pure function of the question and the submission. It never
//! fails: an answer whose shape does not match the question kind is simply
//! incorrect and gets the fallback hint.

use tracing::debug;

use crate::domain::{Answer, Expected, Feedback, Question, QuestionKind, WrongHints};

use super::settings::DEFAULT_FALLBACK_HINT;

/// Grades submissions against questions
#[derive(Debug, Clone)]
pub struct Grader {
    fallback_hint: String,
}

impl Default for Grader {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_HINT)
    }
}

impl Grader {
    pub fn new(fallback_hint: impl Into<String>) -> Self {
        Self {
            fallback_hint: fallback_hint.into(),
        }
    }

    /// Grade a submission and select the feedback message
    pub fn grade(&self, question: &Question, answer: &Answer) -> Feedback {
        if is_correct(question, answer) {
            return Feedback::correct(question.explanation.clone());
        }

        Feedback::incorrect(self.hint_for(question, answer))
    }

    fn hint_for(&self, question: &Question, answer: &Answer) -> String {
        match (&question.wrong_hints, answer) {
            (Some(WrongHints::PerOption(hints)), Answer::Choice(index))
                if question.kind() == QuestionKind::MultipleChoice =>
            {
                match hints.get(*index) {
                    Some(hint) if !hint.is_empty() => hint.clone(),
                    _ => self.fallback_hint.clone(),
                }
            }
            (Some(WrongHints::Uniform(hint)), _) => hint.clone(),
            _ => self.fallback_hint.clone(),
        }
    }
}

/// Grade with the default fallback hint
pub fn grade(question: &Question, answer: &Answer) -> Feedback {
    Grader::default().grade(question, answer)
}

/// Whether a submission matches the question's expected answer
pub fn is_correct(question: &Question, answer: &Answer) -> bool {
    match (&question.expected, answer) {
        (Expected::MultipleChoice { answer: expected, .. }, Answer::Choice(index)) => {
            index == expected
        }
        (Expected::TrueFalse { answer: expected }, Answer::TrueFalse(value)) => value == expected,
        (Expected::ShortAnswer { answer: expected }, Answer::Text(text)) => {
            normalize(text) == normalize(expected)
        }
        (Expected::Ordering { .. }, Answer::Order(order)) => question
            .canonical_order()
            .map(|canonical| canonical == *order)
            .unwrap_or(false),
        (_, answer) => {
            debug!(
                question = %question.id,
                expected = %question.kind(),
                submitted = %answer.kind(),
                "Answer shape does not match question kind"
            );
            false
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple_choice(hints: Option<WrongHints>) -> Question {
        Question {
            id: "mc".to_string(),
            time: 10.0,
            prompt: "Pick one".to_string(),
            expected: Expected::MultipleChoice {
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                answer: 1,
            },
            explanation: "b is right".to_string(),
            wrong_hints: hints,
        }
    }

    #[test]
    fn test_per_option_hint_selected_by_submission() {
        let q = multiple_choice(Some(WrongHints::PerOption(vec![
            "a".into(),
            "".into(),
            "c".into(),
            "d".into(),
        ])));

        assert_eq!(grade(&q, &Answer::Choice(0)), Feedback::incorrect("a"));
        assert_eq!(grade(&q, &Answer::Choice(3)), Feedback::incorrect("d"));
        assert_eq!(grade(&q, &Answer::Choice(1)), Feedback::correct("b is right"));
    }

    #[test]
    fn test_missing_per_option_slot_falls_back() {
        let q = multiple_choice(Some(WrongHints::PerOption(vec!["a".into()])));
        assert_eq!(
            grade(&q, &Answer::Choice(2)),
            Feedback::incorrect(DEFAULT_FALLBACK_HINT)
        );
    }

    #[test]
    fn test_uniform_hint_for_any_wrong_answer() {
        let q = multiple_choice(Some(WrongHints::Uniform("rewatch the clip".into())));
        assert_eq!(grade(&q, &Answer::Choice(3)).message, "rewatch the clip");
    }

    #[test]
    fn test_shape_mismatch_is_incorrect_with_fallback() {
        let q = multiple_choice(Some(WrongHints::PerOption(vec!["a".into(); 4])));
        let feedback = grade(&q, &Answer::TrueFalse(true));
        assert!(!feedback.correct);
        assert_eq!(feedback.message, DEFAULT_FALLBACK_HINT);
    }

    #[test]
    fn test_custom_fallback() {
        let grader = Grader::new("Try again.");
        let q = multiple_choice(None);
        assert_eq!(grader.grade(&q, &Answer::Choice(0)).message, "Try again.");
    }

    #[test]
    fn test_ordering_requires_full_sequence() {
        let q = Question {
            id: "ord".to_string(),
            time: 1.0,
            prompt: "Order".to_string(),
            expected: Expected::Ordering {
                options: vec!["x".into(), "y".into(), "z".into()],
                answer: None,
            },
            explanation: "x y z".to_string(),
            wrong_hints: None,
        };

        assert!(is_correct(&q, &Answer::Order(vec![0, 1, 2])));
        assert!(!is_correct(&q, &Answer::Order(vec![0, 2, 1])));
        assert!(!is_correct(&q, &Answer::Order(vec![0, 1])));
    }
}
