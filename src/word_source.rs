use std::sync::{mpsc::Sender, Arc};
use std::thread;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, warn};

use crate::error::WordSourceError;
use crate::language::Language;

/// Token tying a word request to the run that issued it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Request for a fresh word list, produced by `Engine::start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRequest {
    pub generation: Generation,
    pub count: usize,
}

/// Answer to a `WordRequest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBatch {
    pub generation: Generation,
    pub words: Result<Vec<String>, WordSourceError>,
}

impl WordBatch {
    pub fn ok(generation: Generation, words: Vec<String>) -> Self {
        Self {
            generation,
            words: Ok(words),
        }
    }

    pub fn failed(generation: Generation, err: WordSourceError) -> Self {
        Self {
            generation,
            words: Err(err),
        }
    }
}

/// Provider of random words. Answers arrive later through the event loop;
/// `request_words` must return without waiting for them.
pub trait WordSource {
    fn request_words(&self, request: WordRequest);
}

/// Samples words from a `Language` on a worker thread and posts the batch
/// back through a channel.
#[derive(Debug)]
pub struct ThreadedWordSource<T> {
    language: Arc<Language>,
    seed: Option<u64>,
    tx: Sender<T>,
}

impl<T> ThreadedWordSource<T>
where
    T: From<WordBatch> + Send + 'static,
{
    pub fn new(language: Language, tx: Sender<T>) -> Self {
        Self {
            language: Arc::new(language),
            seed: None,
            tx,
        }
    }

    /// Use a fixed seed so every run with the same generation draws the
    /// same words.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl<T> WordSource for ThreadedWordSource<T>
where
    T: From<WordBatch> + Send + 'static,
{
    fn request_words(&self, request: WordRequest) {
        let language = Arc::clone(&self.language);
        let tx = self.tx.clone();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(request.generation.value())),
            None => StdRng::from_entropy(),
        };

        debug!(
            generation = request.generation.value(),
            count = request.count,
            "requesting words"
        );

        thread::spawn(move || {
            let words = language.sample(&mut rng, request.count);
            let batch = WordBatch {
                generation: request.generation,
                words,
            };
            if tx.send(T::from(batch)).is_err() {
                warn!(
                    generation = request.generation.value(),
                    "event loop gone, dropping word batch"
                );
            }
        });
    }
}
