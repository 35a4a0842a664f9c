use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{app::App, engine::SessionState};

use super::{bold_style, dim_style, occupied_lines, words_line, HORIZONTAL_MARGIN, VERTICAL_MARGIN};

/// A UI Screen boundary: renders one engine state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Idle - duration and length selectors
pub struct SetupScreen;

/// Running - countdown, words and input line
pub struct TypingScreen;

/// Finished - results followed by the selectors for the next run
pub struct ResultsScreen;

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: SessionState) -> Box<dyn Screen> {
    match state {
        SessionState::Idle => Box::new(SetupScreen),
        SessionState::Running => Box::new(TypingScreen),
        SessionState::Finished => Box::new(ResultsScreen),
    }
}

fn render_settings(app: &App, area: Rect, buf: &mut Buffer) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let time = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Time: {}", app.engine.remaining_secs()),
            bold_style().fg(Color::LightGreen),
        )),
        Line::from(Span::styled(
            format!("next run {}s  (\u{2190}\u{2192})", app.config.duration_secs),
            dim_style(),
        )),
    ])
    .alignment(Alignment::Center);
    time.render(columns[0], buf);

    let length = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Length: {}", app.config.word_count),
            bold_style(),
        )),
        Line::from(Span::styled("(\u{2191}\u{2193})", dim_style())),
    ])
    .alignment(Alignment::Center);
    length.render(columns[1], buf);
}

fn render_legend(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(
        "(enter) start / (\u{2190}\u{2192}) time / (\u{2191}\u{2193}) length / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(area, buf);
}

impl Screen for SetupScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // padding
                Constraint::Length(2), // selectors
                Constraint::Length(1), // error
                Constraint::Min(1),    // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_settings(app, chunks[1], buf);

        if let Some(err) = app.engine.last_error() {
            Paragraph::new(Span::styled(
                format!("could not start: {err}"),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
        }

        render_legend(chunks[4], buf);
    }
}

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let engine = &app.engine;
        let prompt_lines = occupied_lines(engine, area.width);
        let padding = area.height.saturating_sub(prompt_lines.saturating_add(4)) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(2), // countdown
                Constraint::Length(prompt_lines),
                Constraint::Length(3), // input
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            engine.remaining_secs().to_string(),
            bold_style().fg(Color::LightGreen),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        if engine.is_loading() {
            Paragraph::new(Span::styled("Loading...", dim_style()))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        } else {
            Paragraph::new(words_line(engine))
                .alignment(if prompt_lines == 1 {
                    Alignment::Center
                } else {
                    Alignment::Left
                })
                .wrap(Wrap { trim: true })
                .render(chunks[2], buf);
        }

        Paragraph::new(engine.input().to_string())
            .block(Block::default().borders(Borders::ALL))
            .render(chunks[3], buf);
    }
}

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // padding
                Constraint::Length(4), // results
                Constraint::Length(1), // padding
                Constraint::Length(2), // selectors
                Constraint::Min(1),    // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        if let Some(metrics) = app.engine.metrics() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            Paragraph::new(Span::styled(metrics.score.to_string(), bold_style()))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Words per minute"),
                )
                .alignment(Alignment::Center)
                .render(columns[0], buf);

            Paragraph::new(Span::styled(metrics.accuracy.to_string(), bold_style()))
                .block(Block::default().borders(Borders::ALL).title("Accuracy"))
                .alignment(Alignment::Center)
                .render(columns[1], buf);
        }

        render_settings(app, chunks[3], buf);
        render_legend(chunks[5], buf);
    }
}
