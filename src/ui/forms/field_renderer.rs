//! Answer widgets for each input kind

use crate::state::{AnswerValue, ChoiceOption, InputKind, Question};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the input for `question` with its current value
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    value: Option<&AnswerValue>,
    option_cursor: usize,
    is_active: bool,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let (title, lines) = match &question.kind {
        InputKind::Text { placeholder } => {
            (" Answer ", text_lines(value, placeholder, is_active))
        }
        InputKind::Email { placeholder } => {
            (" Email ", text_lines(value, placeholder, is_active))
        }
        InputKind::SingleChoice(options) => (
            " Choose one ",
            choice_lines(options, option_cursor, is_active, |v| {
                value.is_some_and(|current| current.as_text() == v)
            }),
        ),
        InputKind::MultiChoice(options) => (
            " Choose any ",
            choice_lines(options, option_cursor, is_active, |v| {
                value
                    .and_then(AnswerValue::as_choices)
                    .is_some_and(|set| set.contains(v))
            }),
        ),
        InputKind::Range { min, labels, .. } => (
            " Level ",
            range_lines(labels, *min, value.and_then(AnswerValue::as_level)),
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn text_lines<'a>(
    value: Option<&'a AnswerValue>,
    placeholder: &'a str,
    is_active: bool,
) -> Vec<Line<'a>> {
    let cursor = if is_active { "▌" } else { "" };
    let text = value.map(AnswerValue::as_text).unwrap_or_default();

    let content = if text.is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(text, Style::default().fg(Color::Cyan))
    };

    vec![Line::from(vec![
        content,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])]
}

fn choice_lines<'a>(
    options: &'a [ChoiceOption],
    option_cursor: usize,
    is_active: bool,
    is_selected: impl Fn(&str) -> bool,
) -> Vec<Line<'a>> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let highlighted = is_active && i == option_cursor;
            let marker = if is_selected(&option.value) { "◉" } else { "○" };
            let prefix = if highlighted { "▸ " } else { "  " };
            let style = if highlighted {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if is_selected(&option.value) {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(
                format!("{prefix}{marker} {}", option.label),
                style,
            ))
        })
        .collect()
}

fn range_lines(labels: &[String], min: u8, level: Option<u8>) -> Vec<Line<'_>> {
    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let style = if level == Some(min + i as u8) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }

    let status = match level {
        Some(_) => Line::from(""),
        None => Line::from(Span::styled(
            "Not set yet, use ←/→ to pick a level",
            Style::default().fg(Color::DarkGray),
        )),
    };

    vec![Line::from(""), Line::from(spans), Line::from(""), status]
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
