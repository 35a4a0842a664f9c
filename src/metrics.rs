use std::fmt;

use crate::session::ScoreCounters;

/// Share of submitted words that were typed correctly
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accuracy {
    /// Percentage rounded to two decimal places
    Percent(f64),
    /// No word was submitted, so there is nothing to divide by
    NotAvailable,
}

impl Accuracy {
    pub fn from_counters(counters: &ScoreCounters) -> Self {
        let total = counters.submitted();
        if total == 0 {
            return Accuracy::NotAvailable;
        }
        let percent = f64::from(counters.correct_words) / f64::from(total) * 100.0;
        Accuracy::Percent(round_to_hundredths(percent))
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Accuracy::Percent(p) => Some(*p),
            Accuracy::NotAvailable => None,
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accuracy::Percent(p) => write!(f, "{p:.2}%"),
            Accuracy::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// Results of a finished run.
///
/// `score` is displayed under the "words per minute" heading but is the raw
/// number of correctly typed words, not a rate normalised by time or word
/// length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub score: u32,
    pub accuracy: Accuracy,
    pub correct_words: u32,
    pub incorrect_words: u32,
}

impl Metrics {
    pub fn from_counters(counters: &ScoreCounters) -> Self {
        Self {
            score: counters.correct_words,
            accuracy: Accuracy::from_counters(counters),
            correct_words: counters.correct_words,
            incorrect_words: counters.incorrect_words,
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
