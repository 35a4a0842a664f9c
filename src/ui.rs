pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, engine::Engine, session::Judgement};

pub const HORIZONTAL_MARGIN: u16 = 5;
pub const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.engine.state()).render(self, area, buf);
    }
}

pub fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn judgement_style(judgement: Judgement) -> Style {
    match judgement {
        Judgement::Correct => Style::default()
            .patch(bold_style())
            .fg(Color::Black)
            .bg(Color::Green),
        Judgement::Incorrect => Style::default()
            .patch(bold_style())
            .fg(Color::White)
            .bg(Color::Red),
        Judgement::Neutral => Style::default(),
    }
}

/// Word list as one line of spans, one span per character, coloured by the
/// engine's judgement. The current word is underlined.
pub fn words_line(engine: &Engine) -> Line<'static> {
    let current = engine.cursor().word_index;
    let mut spans = Vec::new();

    for (word_idx, word) in engine.words().iter().enumerate() {
        for (char_idx, c) in word.chars().enumerate() {
            let mut style = judgement_style(engine.judge(word_idx, char_idx));
            if word_idx == current {
                style = style.add_modifier(Modifier::UNDERLINED);
            } else if word_idx < current {
                style = style.patch(dim_style());
            }
            spans.push(Span::styled(c.to_string(), style));
        }
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

/// Number of terminal rows the word list needs at the given width.
pub fn occupied_lines(engine: &Engine, width: u16) -> u16 {
    let max_chars_per_line = width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1) as usize;
    let text_width: usize = engine.words().iter().map(|w| w.width() + 1).sum();

    if text_width <= max_chars_per_line {
        1
    } else {
        u16::try_from(text_width.div_ceil(max_chars_per_line) + 1).unwrap_or(u16::MAX)
    }
}
