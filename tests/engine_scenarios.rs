use std::time::{Duration, Instant};

use wordrush::{
    config::SessionConfig,
    metrics::Accuracy,
    session::Cursor,
    word_source::WordBatch,
    Engine, Keystroke, SessionState,
};

fn start_with(engine: &mut Engine, words: &[&str]) {
    let req = engine.start().expect("engine should start");
    assert_eq!(req.count, words.len());
    let applied = engine.on_words(
        WordBatch::ok(req.generation, words.iter().map(|w| w.to_string()).collect()),
        Instant::now(),
    );
    assert!(applied);
}

fn type_word(engine: &mut Engine, word: &str) {
    for c in word.chars() {
        engine.feed_keystroke(Keystroke::Char(c));
    }
    engine.feed_keystroke(Keystroke::Space);
}

#[test]
fn every_preset_starts_with_full_clock_and_list() {
    for secs in [10, 15, 30] {
        for count in [5, 20, 50] {
            let mut engine = Engine::new(SessionConfig::new(secs, count).unwrap());
            let words: Vec<String> = (0..count).map(|i| format!("w{i}")).collect();
            let req = engine.start().unwrap();
            engine.on_words(WordBatch::ok(req.generation, words), Instant::now());

            assert_eq!(engine.words().len(), count);
            assert_eq!(engine.remaining_secs(), secs);
        }
    }
}

#[test]
fn engine_accepts_values_outside_presets() {
    let mut engine = Engine::new(SessionConfig::new(7, 3).unwrap());
    start_with(&mut engine, &["x", "y", "z"]);
    assert_eq!(engine.remaining_secs(), 7);
}

#[test]
fn five_words_typed_before_time_runs_out() {
    let words = ["the", "quick", "brown", "fox", "jumps"];
    let mut engine = Engine::new(SessionConfig::new(10, 5).unwrap());
    start_with(&mut engine, &words);

    let t0 = Instant::now();
    for (i, word) in words.iter().enumerate() {
        engine.advance_clock(t0 + Duration::from_millis(500 * i as u64));
        type_word(&mut engine, word);
    }

    assert_eq!(engine.state(), SessionState::Finished);
    let metrics = engine.metrics().unwrap();
    assert_eq!(metrics.correct_words, 5);
    assert_eq!(metrics.incorrect_words, 0);
    assert_eq!(metrics.score, 5);
    assert_eq!(metrics.accuracy, Accuracy::Percent(100.0));
}

#[test]
fn three_right_one_wrong_is_seventy_five_percent() {
    let mut engine = Engine::new(SessionConfig::new(10, 5).unwrap());
    start_with(&mut engine, &["a", "b", "c", "d", "e"]);

    type_word(&mut engine, "a");
    type_word(&mut engine, "b");
    type_word(&mut engine, "nope");
    type_word(&mut engine, "d");
    for _ in 0..10 {
        engine.on_tick();
    }

    let metrics = engine.metrics().unwrap();
    assert_eq!(metrics.accuracy, Accuracy::Percent(75.0));
    assert_eq!(metrics.accuracy.to_string(), "75.00%");
}

#[test]
fn expiry_wins_over_a_late_keystroke() {
    let mut engine = Engine::new(SessionConfig::new(2, 3).unwrap());
    start_with(&mut engine, &["a", "b", "c"]);

    // two seconds pass before the key is processed
    engine.advance_clock(Instant::now() + Duration::from_secs(3));
    type_word(&mut engine, "a");

    assert_eq!(engine.state(), SessionState::Finished);
    assert_eq!(engine.counters().submitted(), 0);
}

#[test]
fn backspace_before_first_char_goes_negative() {
    let mut engine = Engine::new(SessionConfig::new(10, 1).unwrap());
    start_with(&mut engine, &["cat"]);

    engine.feed_keystroke(Keystroke::Backspace);
    assert_eq!(
        engine.cursor(),
        Cursor {
            word_index: 0,
            char_index: -2
        }
    );

    // typing resumes from the negative position without panicking
    type_word(&mut engine, "cat");
    assert_eq!(engine.counters().correct_words, 1);
}

#[test]
fn restart_discards_previous_run_state() {
    let mut engine = Engine::new(SessionConfig::new(1, 2).unwrap());
    start_with(&mut engine, &["a", "b"]);
    type_word(&mut engine, "x");
    engine.on_tick();
    assert_eq!(engine.state(), SessionState::Finished);

    start_with(&mut engine, &["c", "d"]);
    assert_eq!(engine.state(), SessionState::Running);
    assert_eq!(engine.counters().submitted(), 0);
    assert_eq!(engine.cursor(), Cursor::default());
    assert!(engine.is_clock_armed());
}
