//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::{Lifecycle, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Completion status
    let completion = if app.store.is_completed() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Yellow))
    };
    spans.push(completion);

    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> &'static str {
    if app.state.pending_reset.is_some() {
        return "↑↓:select  Enter:confirm  Esc:cancel";
    }
    match app.state.current_view {
        View::Splash => "Press any key to skip",
        View::Onboarding if app.form.lifecycle() == Lifecycle::Submitting => "Submitting...",
        View::Onboarding => {
            let kind = &app.form.current_question().kind;
            if kind.is_text_entry() {
                "type:answer  Enter:next  Esc:back"
            } else if kind.options().is_empty() {
                "←/→:level  Enter:next  Esc:back  q:quit"
            } else {
                "↑↓:move  Space:select  Enter:next  Esc:back  q:quit"
            }
        }
        View::Submitted => "Enter:continue",
        View::Settings => "Tab:switch tab  ↑↓:select  ←/→:adjust  s:save  r:redo onboarding  q:quit",
    }
}
