//! Scheduler Integration Tests
//!
//! Tests for question activation, watch-again, lesson switching and play
//! veto through the public controller and session API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lessonquiz::core::{BackwardSeekPolicy, Controller, QuizSession, QuizState, SessionSettings};
use lessonquiz::domain::{Answer, LessonId, SessionEventKind};
use lessonquiz::surface::{RecordingSurface, SurfaceCommand};
use lessonquiz::Catalog;

const CATALOG: &str = r#"
modules:
  - id: m1
    title: Module One
    lessons:
      - id: alpha
        title: Alpha
        duration: 60
        video_src: alpha.mp4
        questions:
          - id: alpha-2
            time: 2
            kind: true-false
            prompt: Alpha at two?
            answer: true
            explanation: Yes.
          - id: alpha-8
            time: 8.5
            kind: multiple-choice
            prompt: Pick the second
            options: [one, two, three]
            answer: 1
            explanation: Two it is.
      - id: beta
        title: Beta
        duration: 60
        video_src: beta.mp4
        questions:
          - id: beta-2
            time: 2
            kind: short-answer
            prompt: Say beta
            answer: beta
            explanation: Beta.
"#;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_yaml(CATALOG).unwrap())
}

fn controller(settings: SessionSettings) -> Controller<RecordingSurface> {
    let mut c = Controller::with_lesson(catalog(), &LessonId::from("alpha"), settings).unwrap();
    c.mount(RecordingSurface::new());
    c.start();
    c
}

fn activations(c: &mut Controller<RecordingSurface>) -> Vec<String> {
    c.take_events()
        .into_iter()
        .filter_map(|e| match e.kind {
            SessionEventKind::QuestionActivated { question_id, .. } => Some(question_id),
            _ => None,
        })
        .collect()
}

#[test]
fn test_question_activates_once_per_second() {
    let mut c = controller(SessionSettings::default());

    for t in [1.0, 1.9, 2.0, 2.1, 2.9] {
        c.on_time_update(t);
    }

    assert_eq!(activations(&mut c), vec!["alpha-2"]);
    assert_eq!(c.state(), QuizState::Asked);
    assert!(!c.session().is_playing());
    assert_eq!(c.session().last_processed_second(), 2);
}

#[test]
fn test_repeated_reports_are_idempotent() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.0);
    c.dismiss();

    for _ in 0..5 {
        assert!(!c.on_time_update(2.4));
    }
    assert_eq!(activations(&mut c).len(), 1);
    assert_eq!(c.state(), QuizState::Idle);
}

#[test]
fn test_fractional_question_time_uses_whole_second() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.0);
    c.dismiss();

    assert!(c.on_time_update(8.0));
    assert_eq!(c.session().active_question().unwrap().id, "alpha-8");
}

#[test]
fn test_skipped_second_is_never_asked() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(1.5);
    c.on_time_update(3.0);

    assert!(activations(&mut c).is_empty());
    assert_eq!(c.state(), QuizState::Idle);
}

#[test]
fn test_watch_again_seeks_back_and_clears_after_debounce() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.0);
    c.dismiss();
    c.on_time_update(8.2);
    c.on_time_update(10.0);

    let t0 = Instant::now();
    let target = c.watch_again(t0);

    assert_eq!(target, 6.0);
    assert_eq!(c.session().pending_seek(), Some(6.0));
    assert_eq!(c.state(), QuizState::Idle);
    assert!(c.session().is_playing());

    assert!(!c.poll(t0 + Duration::from_millis(99)));
    assert_eq!(c.session().pending_seek(), Some(6.0));
    assert!(c.poll(t0 + Duration::from_millis(100)));
    assert_eq!(c.session().pending_seek(), None);

    assert_eq!(c.surface().unwrap().seeks(), vec![6.0]);
}

#[test]
fn test_second_watch_again_supersedes_pending_clear() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(10.0);

    let t0 = Instant::now();
    c.watch_again(t0);
    c.watch_again(t0 + Duration::from_millis(60));

    // The first deadline has passed but was replaced
    assert!(!c.poll(t0 + Duration::from_millis(120)));
    assert!(c.session().pending_seek().is_some());
    assert!(c.poll(t0 + Duration::from_millis(160)));
    assert!(c.session().pending_seek().is_none());

    // Same target twice still reaches the surface twice
    assert_eq!(c.surface().unwrap().seeks(), vec![6.0, 6.0]);
}

#[test]
fn test_watch_again_clamps_at_zero() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.0);

    assert_eq!(c.watch_again(Instant::now()), 0.0);
    assert_eq!(c.state(), QuizState::Idle);
}

#[test]
fn test_replayed_window_does_not_retrigger_under_strict_policy() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.0);
    c.dismiss();
    c.on_time_update(8.0);
    c.submit(Answer::Choice(1));
    c.continue_playback();
    c.on_time_update(10.0);
    activations(&mut c);

    c.watch_again(Instant::now());
    for t in [6.0, 7.0, 8.0, 9.0, 10.0] {
        c.on_time_update(t);
    }

    assert!(activations(&mut c).is_empty());
    assert_eq!(c.state(), QuizState::Idle);
}

#[test]
fn test_replayed_window_retriggers_under_relaxed_policy() {
    let settings = SessionSettings {
        backward_seek: BackwardSeekPolicy::Relaxed,
        ..Default::default()
    };
    let mut c = controller(settings);
    c.on_time_update(2.0);
    c.dismiss();
    c.on_time_update(8.0);
    c.submit(Answer::Choice(1));
    c.continue_playback();
    c.on_time_update(10.0);
    activations(&mut c);

    c.watch_again(Instant::now());
    for t in [6.0, 7.0, 8.0] {
        c.on_time_update(t);
    }

    assert_eq!(activations(&mut c), vec!["alpha-8"]);
}

#[test]
fn test_switching_lessons_resets_progress() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.4);
    assert_eq!(c.state(), QuizState::Asked);

    assert!(c.select_lesson(&LessonId::from("beta")));
    assert_eq!(c.state(), QuizState::Idle);
    assert_eq!(c.session().lesson().id, LessonId::from("beta"));
    assert!(!c.session().has_started());
    assert_eq!(c.session().pending_seek(), None);
    activations(&mut c);

    c.start();
    assert!(c.on_time_update(2.0));
    assert_eq!(c.session().active_question().unwrap().id, "beta-2");
}

#[test]
fn test_switching_lessons_cancels_pending_seek_clear() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(10.0);

    let t0 = Instant::now();
    c.watch_again(t0);
    c.select_lesson(&LessonId::from("beta"));
    c.take_events();

    assert!(!c.poll(t0 + Duration::from_secs(1)));
    assert!(c
        .take_events()
        .iter()
        .all(|e| e.kind != SessionEventKind::SeekCleared));
}

#[test]
fn test_unknown_lesson_keeps_current_session() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.0);

    assert!(!c.select_lesson(&LessonId::from("gamma")));
    assert_eq!(c.session().lesson().id, LessonId::from("alpha"));
    assert_eq!(c.state(), QuizState::Asked);
}

#[test]
fn test_play_attempt_vetoed_while_question_active() {
    let mut c = controller(SessionSettings::default());
    assert!(c.on_play_attempt());

    c.on_time_update(2.0);
    c.surface_mut().unwrap().take_commands();

    assert!(!c.on_play_attempt());
    assert_eq!(c.surface().unwrap().commands(), &[SurfaceCommand::Pause]);

    let vetoed = c
        .take_events()
        .into_iter()
        .any(|e| matches!(e.kind, SessionEventKind::PlayVetoed { .. }));
    assert!(vetoed);
}

#[test]
fn test_session_without_surface() {
    let lesson = Arc::new(catalog().lesson(&LessonId::from("beta")).unwrap().clone());
    let mut session = QuizSession::new(lesson, SessionSettings::default());
    session.start();

    assert!(session.on_time_update(2.0));
    let feedback = session.submit(Answer::Text("  BETA ".to_string())).unwrap();
    assert!(feedback.correct);
    assert_eq!(feedback.message, "Beta.");
    assert!(session.continue_playback());
    assert!(session.is_playing());
}

#[test]
fn test_non_finite_time_report_keeps_backward_guard() {
    let mut c = controller(SessionSettings::default());
    c.on_time_update(2.0);
    c.dismiss();
    c.on_time_update(10.0);
    activations(&mut c);

    assert!(!c.on_time_update(f64::NAN));
    assert_eq!(c.session().current_time(), 10.0);

    // a rewind after the bad report still cannot re-ask alpha-8
    for t in [7.0, 8.0, 9.0] {
        c.on_time_update(t);
    }
    assert!(activations(&mut c).is_empty());
}
