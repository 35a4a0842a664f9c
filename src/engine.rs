use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::session::{Cursor, Judgement, ScoreCounters, Session};
use crate::timer::Countdown;
use crate::word_source::{Generation, WordBatch, WordRequest};

const SPACE_KEY_CODE: u32 = 32;
const BACKSPACE_KEY_CODE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Idle,
    Running,
    Finished,
}

/// A key press as the engine understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// Submits the current word
    Space,
    Backspace,
    Char(char),
}

impl Keystroke {
    /// Classify a browser-style key code plus the produced character.
    pub fn from_code(code: u32, key: char) -> Self {
        match code {
            SPACE_KEY_CODE => Keystroke::Space,
            BACKSPACE_KEY_CODE => Keystroke::Backspace,
            _ => Keystroke::Char(key),
        }
    }
}

/// Drives one typing test at a time: idle -> running -> finished.
#[derive(Debug)]
pub struct Engine {
    config: SessionConfig,
    active: SessionConfig,
    state: SessionState,
    session: Session,
    remaining_secs: u32,
    timer: Countdown,
    generation: Generation,
    pending: Option<Generation>,
    last_error: Option<EngineError>,
    revision: u64,
}

impl Engine {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            active: config,
            state: SessionState::Idle,
            session: Session::default(),
            remaining_secs: config.duration_secs(),
            timer: Countdown::every_second(),
            generation: Generation::default(),
            pending: None,
            last_error: None,
            revision: 0,
        }
    }

    /// Replace the configuration used by the next run.
    ///
    /// Ignored while a run is in progress; returns whether it was applied.
    pub fn configure(&mut self, config: SessionConfig) -> bool {
        if self.state == SessionState::Running {
            debug!(?config, "configure ignored while running");
            return false;
        }

        self.config = config;
        if self.state == SessionState::Idle {
            self.remaining_secs = config.duration_secs();
        }
        self.touch();
        true
    }

    /// Begin a new run. The returned request must be handed to a word
    /// source; its answer goes to `on_words`.
    pub fn start(&mut self) -> Option<WordRequest> {
        if self.state == SessionState::Running {
            debug!("start ignored, run already in progress");
            return None;
        }

        self.timer.cancel();
        self.generation = self.generation.next();
        self.active = self.config;
        self.session = Session::default();
        self.remaining_secs = self.active.duration_secs();
        self.pending = Some(self.generation);
        self.last_error = None;
        self.state = SessionState::Running;
        self.touch();

        info!(
            generation = self.generation.value(),
            duration_secs = self.active.duration_secs(),
            word_count = self.active.word_count(),
            "run started"
        );

        Some(WordRequest {
            generation: self.generation,
            count: self.active.word_count(),
        })
    }

    /// Accept the word list for the pending run.
    ///
    /// Batches for any other generation are discarded. Returns whether the
    /// batch was applied. The countdown starts at `now`.
    pub fn on_words(&mut self, batch: WordBatch, now: Instant) -> bool {
        if self.state != SessionState::Running || self.pending != Some(batch.generation) {
            debug!(
                generation = batch.generation.value(),
                "discarding stale word batch"
            );
            return false;
        }
        self.pending = None;

        match self.validate_batch(batch.words) {
            Ok(words) => {
                self.session.load(words);
                self.timer.arm(now);
                debug!(generation = batch.generation.value(), "word list loaded");
            }
            Err(err) => {
                warn!(%err, "word list unavailable, back to idle");
                self.timer.cancel();
                self.session = Session::default();
                self.state = SessionState::Idle;
                self.remaining_secs = self.config.duration_secs();
                self.last_error = Some(err);
            }
        }
        self.touch();
        true
    }

    fn validate_batch(
        &self,
        words: Result<Vec<String>, crate::error::WordSourceError>,
    ) -> Result<Vec<String>, EngineError> {
        let words = words?;
        let expected = self.active.word_count();
        if words.is_empty() {
            return Err(EngineError::EmptyWordList);
        }
        if words.len() != expected {
            return Err(EngineError::WrongWordCount {
                expected,
                got: words.len(),
            });
        }
        Ok(words)
    }

    /// One second of the countdown has elapsed.
    pub fn on_tick(&mut self) {
        if self.state != SessionState::Running || self.is_loading() {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.finish();
        }
        self.touch();
    }

    /// Fire `on_tick` once for every second the clock says has passed.
    pub fn advance_clock(&mut self, now: Instant) {
        let due = self.timer.poll(now);
        for _ in 0..due {
            if self.state != SessionState::Running {
                break;
            }
            self.on_tick();
        }
    }

    pub fn feed_keystroke(&mut self, key: Keystroke) {
        if self.state != SessionState::Running {
            return;
        }
        if self.is_loading() {
            debug!(?key, "dropping keystroke while words load");
            return;
        }

        match key {
            Keystroke::Space => {
                let matched = self.session.submit_word();
                debug!(matched, cursor = ?self.session.cursor(), "word submitted");
                if self.session.is_exhausted() {
                    self.remaining_secs = 0;
                    self.finish();
                }
            }
            Keystroke::Backspace => self.session.backspace(),
            Keystroke::Char(c) => self.session.type_char(c),
        }
        self.touch();
    }

    /// Abandon the current run, if any, and return to idle.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.pending = None;
        self.session = Session::default();
        self.state = SessionState::Idle;
        self.remaining_secs = self.config.duration_secs();
        self.last_error = None;
        self.touch();
        debug!("engine reset");
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.session.clear_input();
        self.state = SessionState::Finished;
        let counters = self.session.counters();
        info!(
            correct = counters.correct_words,
            incorrect = counters.incorrect_words,
            "run finished"
        );
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn words(&self) -> &[String] {
        self.session.words()
    }

    pub fn cursor(&self) -> Cursor {
        self.session.cursor()
    }

    pub fn input(&self) -> &str {
        self.session.input()
    }

    pub fn counters(&self) -> ScoreCounters {
        self.session.counters()
    }

    /// Running but still waiting for the word list.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_clock_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn last_error(&self) -> Option<&EngineError> {
        self.last_error.as_ref()
    }

    /// Bumped on every observable change; views re-render when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn judge(&self, word_idx: usize, char_idx: usize) -> Judgement {
        self.session
            .judge(word_idx, char_idx, self.state == SessionState::Finished)
    }

    pub fn metrics(&self) -> Option<Metrics> {
        (self.state == SessionState::Finished)
            .then(|| Metrics::from_counters(&self.session.counters()))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
