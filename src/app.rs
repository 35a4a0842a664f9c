use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::config::{Config, ConfigStore};
use crate::engine::{Engine, Keystroke, SessionState};
use crate::runtime::AppEvent;
use crate::word_source::WordSource;

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// View-side controller: turns terminal events into engine calls and keeps
/// the user's settings in sync with the store.
pub struct App {
    pub engine: Engine,
    pub config: Config,
    store: Box<dyn ConfigStore>,
    word_source: Box<dyn WordSource>,
}

impl App {
    pub fn new(
        config: Config,
        store: Box<dyn ConfigStore>,
        word_source: Box<dyn WordSource>,
    ) -> Result<Self, crate::error::ConfigError> {
        let engine = Engine::new(config.session_config()?);
        Ok(Self {
            engine,
            config,
            store,
            word_source,
        })
    }

    pub fn start(&mut self) {
        if let Some(request) = self.engine.start() {
            self.word_source.request_words(request);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Control {
        self.handle_event_at(event, Instant::now())
    }

    /// Like [`App::handle_event`], with the clock reading supplied by the caller.
    pub fn handle_event_at(&mut self, event: AppEvent, now: Instant) -> Control {
        match event {
            AppEvent::Tick => {
                self.engine.advance_clock(now);
                Control::Continue
            }
            AppEvent::Resize => Control::Continue,
            AppEvent::Words(batch) => {
                self.engine.on_words(batch, now);
                Control::Continue
            }
            AppEvent::Key(key) => {
                // a second that ran out before this key press wins
                self.engine.advance_clock(now);
                self.handle_key(key)
            }
        }
    }

    /// Outside a run only named keys do anything: printable characters are
    /// ignored so that typing past the end of a run keeps its results.
    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        match self.engine.state() {
            SessionState::Running => {
                match key.code {
                    KeyCode::Esc => self.engine.reset(),
                    KeyCode::Backspace => self.engine.feed_keystroke(Keystroke::Backspace),
                    KeyCode::Char(' ') => self.engine.feed_keystroke(Keystroke::Space),
                    KeyCode::Char(c) => self.engine.feed_keystroke(Keystroke::Char(c)),
                    _ => {}
                }
                Control::Continue
            }
            SessionState::Idle | SessionState::Finished => {
                match key.code {
                    KeyCode::Esc => return Control::Quit,
                    KeyCode::Enter => self.start(),
                    KeyCode::Left | KeyCode::Right => {
                        self.config.cycle_duration();
                        self.apply_config();
                    }
                    KeyCode::Up | KeyCode::Down => {
                        self.config.cycle_word_count();
                        self.apply_config();
                    }
                    _ => {}
                }
                Control::Continue
            }
        }
    }

    fn apply_config(&mut self) {
        let session_config = match self.config.session_config() {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(%err, "rejecting config");
                return;
            }
        };
        if !self.engine.configure(session_config) {
            return;
        }
        debug!(config = ?self.config, "config changed");
        if let Err(err) = self.store.save(&self.config) {
            warn!(%err, "unable to save config");
        }
    }
}
