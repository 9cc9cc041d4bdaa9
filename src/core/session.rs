//! Quiz session state machine.
//!
//! Owns all transient state for one lesson viewing: the playback tracker,
//! the active question, the latest feedback, play intent and the pending
//! seek. The video surface and catalog are never owned here.
//!
//! ```text
//! Idle ──(question second crossed)──▶ Asked
//! Asked / AnsweredWrong ──(submit)──▶ AnsweredCorrect | AnsweredWrong
//! AnsweredCorrect ──(continue)──▶ Idle
//! any ──(watch again | dismiss | switch lesson)──▶ Idle
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::domain::{Answer, Feedback, Lesson, Question, SessionEvent, SessionEventKind};

use super::grader::Grader;
use super::index::QuestionIndex;
use super::settings::SessionSettings;
use super::timer::Debounce;
use super::tracker::PlaybackTracker;

/// Presentation state of the quiz overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No active question; playback may proceed
    Idle,

    /// A question is shown and awaiting a submission
    Asked,

    /// The last submission was wrong; retry or watch again
    AnsweredWrong,

    /// The last submission was right; awaiting continue
    AnsweredCorrect,
}

/// Transient state for one lesson viewing
#[derive(Debug)]
pub struct QuizSession {
    settings: SessionSettings,
    grader: Grader,
    index: QuestionIndex,
    tracker: PlaybackTracker,

    /// Position of the active question in the lesson
    active: Option<usize>,
    feedback: Option<Feedback>,
    is_playing: bool,
    has_started: bool,
    pending_seek: Option<f64>,

    /// Bumped on every new seek request so repeated identical targets are
    /// still distinguishable by the surface driver
    seek_serial: u64,
    seek_clear: Debounce,

    events: Vec<SessionEvent>,
}

impl QuizSession {
    /// Create a session for a lesson
    pub fn new(lesson: Arc<Lesson>, settings: SessionSettings) -> Self {
        let mut session = Self {
            grader: Grader::new(settings.fallback_hint.clone()),
            tracker: PlaybackTracker::new(settings.backward_seek),
            index: QuestionIndex::build(lesson),
            settings,
            active: None,
            feedback: None,
            is_playing: false,
            has_started: false,
            pending_seek: None,
            seek_serial: 0,
            seek_clear: Debounce::new(),
            events: Vec::new(),
        };
        session.record(SessionEventKind::LessonLoaded);
        session
    }

    /// The "start lesson" action
    pub fn start(&mut self) {
        if self.has_started {
            return;
        }
        self.has_started = true;
        self.is_playing = true;
        info!(lesson = %self.lesson().id, "Lesson started");
        self.record(SessionEventKind::PlaybackStarted);
    }

    /// Handle a time report from the video surface. Returns true if a
    /// question became active.
    pub fn on_time_update(&mut self, current_time: f64) -> bool {
        let Some(second) = self.tracker.observe(current_time) else {
            return false;
        };

        let Some(pos) = self.index.position(second) else {
            return false;
        };

        if self.active.is_some() {
            debug!(second, "Question second crossed while another question is active");
            return false;
        }

        self.active = Some(pos);
        self.feedback = None;
        self.is_playing = false;

        let question_id = self.lesson().questions[pos].id.clone();
        info!(question = %question_id, second, "Question activated, playback paused");
        self.record(SessionEventKind::QuestionActivated {
            question_id,
            second,
        });
        true
    }

    /// Grade a submission for the active question. Without an active
    /// question, or once it was answered correctly, this is a no-op.
    #[instrument(skip(self, answer), fields(lesson = %self.lesson().id))]
    pub fn submit(&mut self, answer: Answer) -> Option<&Feedback> {
        let Some(pos) = self.active else {
            debug!("Submission without an active question ignored");
            return None;
        };

        if self.state() == QuizState::AnsweredCorrect {
            debug!("Question already answered correctly; submission ignored");
            return self.feedback.as_ref();
        }

        let question = &self.index.lesson().questions[pos];
        let feedback = self.grader.grade(question, &answer);
        let question_id = question.id.clone();

        info!(question = %question_id, correct = feedback.correct, "Answer graded");
        self.record(SessionEventKind::AnswerGraded {
            question_id,
            correct: feedback.correct,
            message: feedback.message.clone(),
        });

        self.feedback = Some(feedback);
        self.feedback.as_ref()
    }

    /// The "continue" action, only available after a correct answer
    pub fn continue_playback(&mut self) -> bool {
        if self.state() != QuizState::AnsweredCorrect {
            debug!(state = ?self.state(), "Continue ignored");
            return false;
        }
        self.close_question()
    }

    /// Close the overlay from any question state and resume playback
    pub fn dismiss(&mut self) -> bool {
        self.close_question()
    }

    fn close_question(&mut self) -> bool {
        let Some(pos) = self.active.take() else {
            return false;
        };

        self.feedback = None;
        self.is_playing = true;

        let question_id = self.lesson().questions[pos].id.clone();
        self.record(SessionEventKind::QuestionDismissed { question_id });
        true
    }

    /// The "watch again" action: rewind a few seconds, drop the active
    /// question and resume. The already-processed seconds are not re-armed,
    /// so questions inside the replayed window do not trigger again under
    /// the strict backward-seek policy.
    #[instrument(skip(self), fields(lesson = %self.lesson().id))]
    pub fn watch_again(&mut self, now: Instant) -> f64 {
        let target = (self.tracker.current_time() - self.settings.replay_rewind_seconds).max(0.0);

        self.pending_seek = Some(target);
        self.seek_serial += 1;
        if self.seek_clear.schedule(now, self.settings.seek_debounce()) {
            debug!("Superseded pending seek clear");
        }

        self.active = None;
        self.feedback = None;
        self.is_playing = true;

        info!(target, "Watch again");
        self.record(SessionEventKind::ReplayRequested { target });
        target
    }

    /// Fire due timers. Returns true if anything changed.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        if self.seek_clear.fire(now) {
            self.pending_seek = None;
            self.record(SessionEventKind::SeekCleared);
            return true;
        }
        false
    }

    /// Load another lesson, discarding all transient state
    #[instrument(skip(self, lesson), fields(from = %self.lesson().id, to = %lesson.id))]
    pub fn switch_lesson(&mut self, lesson: Arc<Lesson>) {
        if !self.index.rebuild_for(lesson) {
            debug!("Same lesson instance; keeping question index");
        }

        self.tracker.reset();
        self.seek_clear.cancel();
        self.active = None;
        self.feedback = None;
        self.is_playing = false;
        self.has_started = false;
        self.pending_seek = None;

        info!("Lesson switched");
        self.record(SessionEventKind::LessonLoaded);
    }

    /// Veto hook for play attempts that did not come from the session
    pub fn allows_play(&self) -> bool {
        self.active.is_none()
    }

    /// Record that a play attempt was rejected
    pub fn note_play_vetoed(&mut self) {
        self.is_playing = false;
        if let Some(question) = self.active_question() {
            let question_id = question.id.clone();
            self.record(SessionEventKind::PlayVetoed { question_id });
        }
    }

    /// Current presentation state
    pub fn state(&self) -> QuizState {
        match (self.active, &self.feedback) {
            (None, _) => QuizState::Idle,
            (Some(_), None) => QuizState::Asked,
            (Some(_), Some(f)) if f.correct => QuizState::AnsweredCorrect,
            (Some(_), Some(_)) => QuizState::AnsweredWrong,
        }
    }

    pub fn lesson(&self) -> &Arc<Lesson> {
        self.index.lesson()
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active.map(|pos| &self.index.lesson().questions[pos])
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn pending_seek(&self) -> Option<f64> {
        self.pending_seek
    }

    pub fn seek_serial(&self) -> u64 {
        self.seek_serial
    }

    pub fn current_time(&self) -> f64 {
        self.tracker.current_time()
    }

    pub fn last_processed_second(&self) -> i64 {
        self.tracker.last_processed_second()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Drain recorded events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, kind: SessionEventKind) {
        let event = SessionEvent::new(self.lesson().id.clone(), self.tracker.current_time(), kind);
        self.events.push(event);
    }
}
