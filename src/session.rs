/// Position of the typist inside the word list.
///
/// `char_index` is -1 before anything was typed into the current word and
/// is allowed to go further negative on repeated backspaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub word_index: usize,
    pub char_index: isize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            word_index: 0,
            char_index: -1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreCounters {
    pub correct_words: u32,
    pub incorrect_words: u32,
}

impl ScoreCounters {
    pub fn submitted(&self) -> u32 {
        self.correct_words + self.incorrect_words
    }
}

/// Per-character classification used for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    Neutral,
    Correct,
    Incorrect,
}

/// Typing state of a single run: words, cursor, input and counters
#[derive(Debug, Clone, Default)]
pub struct Session {
    words: Vec<String>,
    cursor: Cursor,
    input: String,
    last_typed: Option<char>,
    counters: ScoreCounters,
}

impl Session {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    /// Install a fresh word list and rewind everything else.
    pub fn load(&mut self, words: Vec<String>) {
        *self = Self::new(words);
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_typed(&self) -> Option<char> {
        self.last_typed
    }

    pub fn counters(&self) -> ScoreCounters {
        self.counters
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.cursor.word_index).map(String::as_str)
    }

    /// True once the cursor has moved past the last word.
    pub fn is_exhausted(&self) -> bool {
        self.cursor.word_index >= self.words.len()
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.last_typed = None;
    }

    pub fn type_char(&mut self, c: char) {
        self.cursor.char_index += 1;
        self.last_typed = Some(c);
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.cursor.char_index -= 1;
        self.last_typed = None;
        self.input.pop();
    }

    /// Score the buffered input against the current word and move on.
    ///
    /// Returns whether the word matched.
    pub fn submit_word(&mut self) -> bool {
        let matched = self
            .current_word()
            .is_some_and(|word| word == self.input.trim());

        if matched {
            self.counters.correct_words += 1;
        } else {
            self.counters.incorrect_words += 1;
        }

        self.cursor.word_index += 1;
        self.cursor.char_index = -1;
        self.clear_input();

        matched
    }

    pub fn judge(&self, word_idx: usize, char_idx: usize, finished: bool) -> Judgement {
        if word_idx != self.cursor.word_index {
            return Judgement::Neutral;
        }
        let Some(word) = self.words.get(word_idx) else {
            return Judgement::Neutral;
        };
        let Some(expected) = word.chars().nth(char_idx) else {
            return Judgement::Neutral;
        };

        let at_cursor = isize::try_from(char_idx).is_ok_and(|idx| idx == self.cursor.char_index);
        if at_cursor && !finished {
            return if self.last_typed == Some(expected) {
                Judgement::Correct
            } else {
                Judgement::Incorrect
            };
        }

        let word_len = word.chars().count();
        if usize::try_from(self.cursor.char_index).is_ok_and(|idx| idx >= word_len) {
            return Judgement::Incorrect;
        }

        Judgement::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(words: &[&str]) -> Session {
        Session::new(words.iter().map(|w| w.to_string()).collect())
    }

    fn type_str(session: &mut Session, s: &str) {
        for c in s.chars() {
            session.type_char(c);
        }
    }

    #[test]
    fn test_new_session_starts_before_first_char() {
        let s = session(&["hello", "world"]);

        assert_eq!(s.cursor(), Cursor { word_index: 0, char_index: -1 });
        assert_eq!(s.counters(), ScoreCounters::default());
        assert_eq!(s.input(), "");
        assert_eq!(s.current_word(), Some("hello"));
    }

    #[test]
    fn test_submit_correct_word() {
        let mut s = session(&["hello", "world"]);
        type_str(&mut s, "hello");

        assert!(s.submit_word());
        assert_eq!(s.counters().correct_words, 1);
        assert_eq!(s.counters().incorrect_words, 0);
        assert_eq!(s.cursor(), Cursor { word_index: 1, char_index: -1 });
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_submit_wrong_word() {
        let mut s = session(&["hello", "world"]);
        type_str(&mut s, "helo");

        assert!(!s.submit_word());
        assert_eq!(s.counters().correct_words, 0);
        assert_eq!(s.counters().incorrect_words, 1);
    }

    #[test]
    fn test_submit_trims_surrounding_whitespace() {
        let mut s = session(&["cat"]);
        type_str(&mut s, " cat ");

        assert!(s.submit_word());
    }

    #[test]
    fn test_submit_empty_input_is_incorrect() {
        let mut s = session(&["cat"]);

        assert!(!s.submit_word());
        assert_eq!(s.counters().incorrect_words, 1);
    }

    #[test]
    fn test_submit_past_end_counts_incorrect() {
        let mut s = session(&["a"]);
        type_str(&mut s, "a");
        s.submit_word();
        assert!(s.is_exhausted());

        type_str(&mut s, "a");
        assert!(!s.submit_word());
        assert_eq!(s.cursor().word_index, 2);
    }

    #[test]
    fn test_backspace_has_no_floor() {
        let mut s = session(&["cat"]);

        s.backspace();
        assert_eq!(s.cursor().char_index, -2);
        s.backspace();
        assert_eq!(s.cursor().char_index, -3);
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_backspace_edits_input_and_clears_marker() {
        let mut s = session(&["cat"]);
        type_str(&mut s, "cx");

        s.backspace();
        assert_eq!(s.input(), "c");
        assert_eq!(s.last_typed(), None);
        assert_eq!(s.cursor().char_index, 0);

        s.type_char('a');
        s.type_char('t');
        assert!(s.submit_word());
    }

    #[test]
    fn test_judge_correct_and_incorrect_at_cursor() {
        let mut s = session(&["cat", "dog"]);
        s.type_char('c');
        assert_eq!(s.judge(0, 0, false), Judgement::Correct);
        assert_eq!(s.judge(0, 1, false), Judgement::Neutral);

        s.type_char('x');
        assert_eq!(s.judge(0, 1, false), Judgement::Incorrect);
        // only the cursor position is judged
        assert_eq!(s.judge(0, 0, false), Judgement::Neutral);
        assert_eq!(s.judge(1, 1, false), Judgement::Neutral);
    }

    #[test]
    fn test_judge_after_backspace_is_incorrect() {
        let mut s = session(&["cat"]);
        type_str(&mut s, "ca");
        s.backspace();

        assert_eq!(s.judge(0, 0, false), Judgement::Incorrect);
    }

    #[test]
    fn test_judge_overtyped_word_marks_every_char() {
        let mut s = session(&["cat", "dog"]);
        type_str(&mut s, "catt");

        for idx in 0..3 {
            assert_eq!(s.judge(0, idx, false), Judgement::Incorrect);
        }
        assert_eq!(s.judge(1, 0, false), Judgement::Neutral);
    }

    #[test]
    fn test_judge_finished_suppresses_cursor_highlight() {
        let mut s = session(&["cat"]);
        s.type_char('c');

        assert_eq!(s.judge(0, 0, true), Judgement::Neutral);
    }

    #[test]
    fn test_judge_out_of_range_is_neutral() {
        let mut s = session(&["cat"]);
        s.backspace();
        s.backspace();

        assert_eq!(s.judge(0, 0, false), Judgement::Neutral);
        assert_eq!(s.judge(0, 10, false), Judgement::Neutral);
        assert_eq!(s.judge(5, 0, false), Judgement::Neutral);
    }

    #[test]
    fn test_load_resets_everything() {
        let mut s = session(&["cat"]);
        type_str(&mut s, "cat");
        s.submit_word();

        s.load(vec!["dog".to_string()]);
        assert_eq!(s.counters(), ScoreCounters::default());
        assert_eq!(s.cursor(), Cursor::default());
        assert_eq!(s.words(), ["dog".to_string()]);
    }
}
