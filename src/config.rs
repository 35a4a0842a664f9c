use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::ConfigError;

/// Durations offered by the setup screen, in seconds
pub const DURATION_PRESETS: [u32; 3] = [10, 15, 30];
/// Word counts offered by the setup screen
pub const WORD_COUNT_PRESETS: [usize; 3] = [20, 50, 5];

pub const DEFAULT_DURATION_SECS: u32 = 10;
pub const DEFAULT_WORD_COUNT: usize = 20;

/// Validated parameters of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    duration_secs: NonZeroU32,
    word_count: NonZeroUsize,
}

impl SessionConfig {
    pub fn new(duration_secs: u32, word_count: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            duration_secs: NonZeroU32::new(duration_secs).ok_or(ConfigError::ZeroDuration)?,
            word_count: NonZeroUsize::new(word_count).ok_or(ConfigError::ZeroWordCount)?,
        })
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs.get()
    }

    pub fn word_count(&self) -> usize {
        self.word_count.get()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: NonZeroU32::MIN.saturating_add(DEFAULT_DURATION_SECS - 1),
            word_count: NonZeroUsize::MIN.saturating_add(DEFAULT_WORD_COUNT - 1),
        }
    }
}

/// User settings remembered between launches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub duration_secs: u32,
    pub word_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            word_count: DEFAULT_WORD_COUNT,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::new(self.duration_secs, self.word_count)
    }

    pub fn cycle_duration(&mut self) {
        self.duration_secs = next_preset(&DURATION_PRESETS, self.duration_secs);
    }

    pub fn cycle_word_count(&mut self) {
        self.word_count = next_preset(&WORD_COUNT_PRESETS, self.word_count);
    }
}

/// Preset following `current`, or the first preset for custom values.
fn next_preset<T: Copy + PartialEq>(presets: &[T], current: T) -> T {
    let idx = presets
        .iter()
        .position(|p| *p == current)
        .map_or(0, |i| (i + 1) % presets.len());
    presets[idx]
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "wordrush") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wordrush_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) if cfg.session_config().is_ok() => cfg,
            Ok(cfg) => {
                warn!(?cfg, "stored config out of range, using defaults");
                Config::default()
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

/// Store that keeps the config in memory only
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    cfg: std::cell::RefCell<Config>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Config {
        self.cfg.borrow().clone()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        *self.cfg.borrow_mut() = cfg.clone();
        Ok(())
    }
}
