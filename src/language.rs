use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{LanguageError, WordSourceError};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Word list the test draws from
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load an embedded word list by file stem, e.g. `english`.
    pub fn load(name: &str) -> Result<Self, LanguageError> {
        read_language_from_file(&format!("{name}.json"))
    }

    pub fn english() -> Result<Self, LanguageError> {
        Self::load("english")
    }

    /// Draw `count` words with replacement, lowercased.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<String>, WordSourceError> {
        if self.words.is_empty() {
            return Err(WordSourceError::EmptyLanguage(self.name.clone()));
        }

        Ok((0..count)
            .filter_map(|_| self.words.choose(rng))
            .map(|w| w.to_lowercase())
            .collect())
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language, LanguageError> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| LanguageError::NotFound(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| LanguageError::NotUtf8(file_name.to_string()))?;

    from_str(file_as_str).map_err(|source| LanguageError::Parse {
        name: file_name.to_string(),
        source,
    })
}
