//! Catalog Integration Tests
//!
//! Tests for catalog loading, validation and the per-lesson question index.

use std::sync::Arc;

use lessonquiz::catalog::format_time;
use lessonquiz::core::QuestionIndex;
use lessonquiz::domain::{LessonId, QuestionDefect, QuestionKind};
use lessonquiz::{Catalog, CatalogError};
use tempfile::TempDir;

fn lesson_yaml(questions: &str) -> String {
    format!(
        r#"
modules:
  - id: m1
    title: One
    lessons:
      - id: only
        title: Only
        duration: 30
        questions:
{}
"#,
        questions
    )
}

fn validation_error(yaml: &str) -> CatalogError {
    let err = Catalog::from_yaml(yaml).unwrap_err();
    err.downcast::<CatalogError>().unwrap()
}

#[test]
fn test_builtin_catalog_loads() {
    let catalog = Catalog::builtin().unwrap();

    assert_eq!(catalog.modules().len(), 8);
    assert_eq!(
        catalog.default_lesson().unwrap().id,
        LessonId::from("turkey-handling")
    );

    let module = catalog.module("module-4").unwrap();
    assert!(module.implemented);
    assert_eq!(module.lessons.len(), 4);
    assert!(!catalog.module("module-1").unwrap().implemented);
}

#[test]
fn test_builtin_catalog_covers_every_question_kind() {
    let catalog = Catalog::builtin().unwrap();
    let kinds: Vec<QuestionKind> = catalog
        .lessons()
        .flat_map(|l| l.questions.iter().map(|q| q.kind()))
        .collect();

    for kind in [
        QuestionKind::MultipleChoice,
        QuestionKind::TrueFalse,
        QuestionKind::ShortAnswer,
        QuestionKind::Ordering,
    ] {
        assert!(kinds.contains(&kind), "missing {}", kind);
    }
}

#[test]
fn test_index_maps_every_question_second() {
    let catalog = Catalog::builtin().unwrap();

    for lesson in catalog.lessons() {
        let index = QuestionIndex::build(Arc::new(lesson.clone()));

        for q in &lesson.questions {
            assert_eq!(index.get(q.second()).map(|found| &found.id), Some(&q.id));
        }
        for second in 0..=i64::from(lesson.duration) {
            let expected = lesson.questions.iter().any(|q| q.second() == second);
            assert_eq!(index.get(second).is_some(), expected, "{} @ {}", lesson.id, second);
        }
    }
}

#[test]
fn test_index_collision_keeps_last_question() {
    let yaml = lesson_yaml(
        r#"
          - id: first
            time: 4.1
            kind: true-false
            prompt: First
            answer: true
            explanation: First.
          - id: second
            time: 4.9
            kind: true-false
            prompt: Second
            answer: false
            explanation: Second.
"#,
    );
    let catalog = Catalog::from_yaml(&yaml).unwrap();
    let lesson = catalog.lesson(&LessonId::from("only")).unwrap();

    let index = QuestionIndex::build(Arc::new(lesson.clone()));
    assert_eq!(index.len(), 1);
    assert_eq!(index.get(4).unwrap().id, "second");
}

#[test]
fn test_default_lesson_falls_back_to_first_implemented_module() {
    let catalog = Catalog::from_yaml(
        r#"
modules:
  - id: soon
    title: Soon
    implemented: false
    lessons:
      - id: placeholder
        title: Placeholder
        duration: 10
  - id: ready
    title: Ready
    lessons:
      - id: intro
        title: Intro
        duration: 10
"#,
    )
    .unwrap();

    assert_eq!(catalog.default_lesson().unwrap().id, LessonId::from("intro"));
    assert_eq!(catalog.lesson_count(), 2);
}

#[test]
fn test_empty_catalog_rejected() {
    assert_eq!(validation_error("modules: []\n"), CatalogError::Empty);
}

#[test]
fn test_duplicate_lesson_rejected() {
    let yaml = r#"
modules:
  - id: a
    title: A
    lessons:
      - { id: same, title: One, duration: 10 }
  - id: b
    title: B
    lessons:
      - { id: same, title: Two, duration: 10 }
"#;
    assert_eq!(
        validation_error(yaml),
        CatalogError::DuplicateLesson(LessonId::from("same"))
    );
}

#[test]
fn test_unknown_default_rejected() {
    let yaml = r#"
default_lesson: missing
modules:
  - id: a
    title: A
    lessons:
      - { id: present, title: Present, duration: 10 }
"#;
    assert!(matches!(validation_error(yaml), CatalogError::UnknownDefault(_)));
}

#[test]
fn test_answer_out_of_range_rejected() {
    let yaml = lesson_yaml(
        r#"
          - id: bad
            time: 3
            kind: multiple-choice
            prompt: Pick
            options: [a, b]
            answer: 2
            explanation: Nope.
"#,
    );

    match validation_error(&yaml) {
        CatalogError::InvalidQuestion { question, defect, .. } => {
            assert_eq!(question, "bad");
            assert_eq!(
                defect,
                QuestionDefect::AnswerOutOfRange {
                    answer: 2,
                    options: 2
                }
            );
        }
        other => panic!("Expected InvalidQuestion, got {:?}", other),
    }
}

#[test]
fn test_bad_canonical_order_rejected() {
    let yaml = lesson_yaml(
        r#"
          - id: ord
            time: 3
            kind: ordering
            prompt: Order
            options: [a, b, c]
            answer: [0, 0, 2]
            explanation: Nope.
"#,
    );

    assert!(matches!(
        validation_error(&yaml),
        CatalogError::InvalidQuestion {
            defect: QuestionDefect::NotAPermutation { .. },
            ..
        }
    ));
}

#[test]
fn test_per_option_hints_on_true_false_rejected() {
    let yaml = lesson_yaml(
        r#"
          - id: tf
            time: 3
            kind: true-false
            prompt: Really?
            answer: true
            explanation: Yes.
            wrong_hints: [one, two]
"#,
    );

    assert!(matches!(
        validation_error(&yaml),
        CatalogError::InvalidQuestion {
            defect: QuestionDefect::PerOptionHintsOnWrongKind { .. },
            ..
        }
    ));
}

#[test]
fn test_question_past_end_rejected() {
    let yaml = lesson_yaml(
        r#"
          - id: late
            time: 45
            kind: short-answer
            prompt: Too late
            answer: late
            explanation: Late.
"#,
    );

    assert!(matches!(
        validation_error(&yaml),
        CatalogError::QuestionPastEnd { duration: 30, .. }
    ));
}

#[test]
fn test_duplicate_question_rejected() {
    let yaml = lesson_yaml(
        r#"
          - { id: q, time: 3, kind: true-false, prompt: A, answer: true, explanation: A }
          - { id: q, time: 9, kind: true-false, prompt: B, answer: true, explanation: B }
"#,
    );

    assert!(matches!(
        validation_error(&yaml),
        CatalogError::DuplicateQuestion { .. }
    ));
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.yaml");
    std::fs::write(
        &path,
        lesson_yaml(
            r#"
          - id: q
            time: 12.5
            kind: short-answer
            prompt: Name it
            answer: Thing
            explanation: A thing.
"#,
        ),
    )
    .unwrap();

    let catalog = Catalog::from_file(&path).unwrap();
    let lesson = catalog.lesson(&LessonId::from("only")).unwrap();
    assert_eq!(lesson.questions[0].second(), 12);
    assert!(!lesson.has_video());

    assert!(Catalog::from_file(&temp.path().join("missing.yaml")).is_err());
}

#[test]
fn test_format_time() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(75.9), "1:15");
    assert_eq!(format_time(600.0), "10:00");
}
