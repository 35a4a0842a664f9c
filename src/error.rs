use thiserror::Error;

/// Rejected session configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("duration must be at least one second")]
    ZeroDuration,
    #[error("word count must be at least one")]
    ZeroWordCount,
}

/// Failures while loading an embedded word list
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("language file `{0}` not found")]
    NotFound(String),
    #[error("language file `{0}` is not valid utf-8")]
    NotUtf8(String),
    #[error("unable to deserialize language `{name}`")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures reported by a word source in place of a word list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordSourceError {
    #[error("word list `{0}` has no words to choose from")]
    EmptyLanguage(String),
    #[error("word source worker went away before answering")]
    Disconnected,
    #[error("word source failed: {0}")]
    Other(String),
}

/// Errors surfaced by the engine after a run could not start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    WordSource(#[from] WordSourceError),
    #[error("word source returned no words")]
    EmptyWordList,
    #[error("word source returned {got} words, expected {expected}")]
    WrongWordCount { expected: usize, got: usize },
}
