//! Controller coupling a quiz session to a video surface.
//!
//! The session decides; the controller pushes the resulting intent to the
//! surface. A surface may be absent (not yet mounted), in which case every
//! playback command is silently dropped and re-sent on mount.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::domain::{Answer, Feedback, LessonId, SessionEvent};
use crate::surface::VideoSurface;

use super::session::{QuizSession, QuizState};
use super::settings::SessionSettings;

/// Drives a [`QuizSession`] and an optional mounted [`VideoSurface`]
pub struct Controller<S: VideoSurface> {
    catalog: Arc<Catalog>,
    session: QuizSession,
    surface: Option<S>,

    /// Play intent last pushed to the surface
    applied_playing: Option<bool>,

    /// Seek serial last pushed to the surface
    applied_seek: u64,
}

impl<S: VideoSurface> Controller<S> {
    /// Open the catalog's default lesson
    pub fn new(catalog: Arc<Catalog>, settings: SessionSettings) -> Result<Self, CatalogError> {
        let lesson = catalog
            .default_lesson()
            .and_then(|l| catalog.shared_lesson(&l.id))
            .ok_or(CatalogError::Empty)?;
        Ok(Self::with_session(catalog, QuizSession::new(lesson, settings)))
    }

    /// Open a specific lesson
    pub fn with_lesson(
        catalog: Arc<Catalog>,
        lesson_id: &LessonId,
        settings: SessionSettings,
    ) -> Option<Self> {
        let lesson = catalog.shared_lesson(lesson_id)?;
        Some(Self::with_session(catalog, QuizSession::new(lesson, settings)))
    }

    fn with_session(catalog: Arc<Catalog>, session: QuizSession) -> Self {
        Self {
            catalog,
            session,
            surface: None,
            applied_playing: None,
            applied_seek: 0,
        }
    }

    /// Attach a surface and push the current intent to it
    pub fn mount(&mut self, surface: S) -> Option<S> {
        info!(surface = surface.name(), "Surface mounted");
        let previous = self.surface.replace(surface);
        self.applied_playing = None;
        self.sync();
        previous
    }

    /// Detach the surface
    pub fn unmount(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn state(&self) -> QuizState {
        self.session.state()
    }

    /// The "start lesson" action
    pub fn start(&mut self) {
        self.session.start();
        self.sync();
    }

    /// Time report from the surface. Returns true if a question became active.
    pub fn on_time_update(&mut self, current_time: f64) -> bool {
        let activated = self.session.on_time_update(current_time);
        self.sync();
        activated
    }

    /// Play attempt that originated on the surface. Returns false, and
    /// forces the surface back to paused, while a question is active.
    pub fn on_play_attempt(&mut self) -> bool {
        if self.session.allows_play() {
            return true;
        }

        self.session.note_play_vetoed();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_playing(false);
            self.applied_playing = Some(false);
        }
        debug!("Play attempt vetoed");
        false
    }

    /// Submit an answer for the active question
    pub fn submit(&mut self, answer: Answer) -> Option<Feedback> {
        let feedback = self.session.submit(answer).cloned();
        self.sync();
        feedback
    }

    /// The "continue" action after a correct answer
    pub fn continue_playback(&mut self) -> bool {
        let resumed = self.session.continue_playback();
        self.sync();
        resumed
    }

    /// Close the question overlay without answering
    pub fn dismiss(&mut self) -> bool {
        let closed = self.session.dismiss();
        self.sync();
        closed
    }

    /// The "watch again" action
    pub fn watch_again(&mut self, now: Instant) -> f64 {
        let target = self.session.watch_again(now);
        self.sync();
        target
    }

    /// Fire due timers
    pub fn poll(&mut self, now: Instant) -> bool {
        let changed = self.session.poll_timers(now);
        self.sync();
        changed
    }

    /// Switch to another catalog lesson. Unknown ids leave the current
    /// lesson untouched and return false.
    pub fn select_lesson(&mut self, lesson_id: &LessonId) -> bool {
        let Some(lesson) = self.catalog.shared_lesson(lesson_id) else {
            warn!(lesson = %lesson_id, "Lesson not found; staying on current lesson");
            return false;
        };

        self.session.switch_lesson(lesson);
        self.sync();
        true
    }

    /// Drain session events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        self.session.take_events()
    }

    /// Push play intent and any new seek to the surface
    fn sync(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if let Some(target) = self.session.pending_seek() {
            if self.session.seek_serial() != self.applied_seek {
                debug!(target, "Applying seek");
                surface.seek(target);
                self.applied_seek = self.session.seek_serial();
            }
        }

        let playing = self.session.is_playing();
        if self.applied_playing != Some(playing) {
            surface.set_playing(playing);
            self.applied_playing = Some(playing);
        }
    }
}
