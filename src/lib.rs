// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod language;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;
pub mod word_source;

pub use engine::{Engine, Keystroke, SessionState};
