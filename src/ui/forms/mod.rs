//! Onboarding form rendering
//!
//! - `field_renderer`: answer widgets per input kind

mod field_renderer;

use crate::app::App;
use crate::state::Lifecycle;
use field_renderer::{draw_field, draw_help_text};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Draw the current onboarding step
pub fn draw_onboarding(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let question = form.current_question();
    let (step, total, percent) = form.progress();

    let block = Block::default()
        .title(" EarEye Onboarding ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Step counter
            Constraint::Length(1), // Progress gauge
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Prompt
            Constraint::Min(4),    // Answer widget
            Constraint::Length(1), // Validation error
            Constraint::Length(1), // Navigation
        ])
        .margin(2)
        .split(area);

    let counter = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Question {step} of {total}"),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("  {percent}%"), Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(counter, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(percent.min(100))
        .label("");
    frame.render_widget(gauge, chunks[1]);

    let mut prompt = vec![Span::styled(
        question.prompt.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if question.required {
        prompt.push(Span::styled(" *", Style::default().fg(Color::Red)));
    } else {
        prompt.push(Span::styled(
            " (optional)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(prompt)).wrap(Wrap { trim: true }),
        chunks[3],
    );

    draw_field(
        frame,
        chunks[4],
        question,
        form.current_answer(),
        app.option_cursor,
        !form.is_locked(),
    );

    if let Some(error) = form.error() {
        let error_line = Paragraph::new(Line::from(Span::styled(
            format!("⚠ {error}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_line, chunks[5]);
    }

    draw_navigation(frame, chunks[6], app);
}

fn draw_navigation(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;

    if form.lifecycle() == Lifecycle::Submitting {
        let submitting = Paragraph::new(Span::styled(
            "Submitting your preferences...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(submitting, area);
        return;
    }

    let mut hints = Vec::new();
    if !form.is_first_step() {
        hints.push("Esc: back");
    }
    hints.push(if form.is_last_step() {
        "Enter: submit"
    } else {
        "Enter: next"
    });
    draw_help_text(frame, area, &hints.join("   "));
}
