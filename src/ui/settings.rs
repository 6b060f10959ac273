//! Settings dashboard rendering

use crate::app::App;
use crate::state::{SettingsState, SettingsTab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Frame,
};

/// Draw the settings dashboard
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let settings = &app.state.settings;

    let block = Block::default()
        .title(" EarEye Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Tab content
        ])
        .margin(2)
        .split(area);

    let selected_tab = match settings.tab {
        SettingsTab::Sound => 0,
        SettingsTab::Objects => 1,
    };
    let tabs = Tabs::new(vec![
        SettingsTab::Sound.label(),
        SettingsTab::Objects.label(),
    ])
    .select(selected_tab)
    .style(Style::default().fg(Color::DarkGray))
    .highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(tabs, chunks[0]);

    match settings.tab {
        SettingsTab::Sound => draw_sound_tab(frame, chunks[2], settings),
        SettingsTab::Objects => draw_objects_tab(frame, chunks[2], settings),
    }
}

fn draw_sound_tab(frame: &mut Frame, area: Rect, settings: &SettingsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Volume
            Constraint::Length(3), // Frequency
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Summary
        ])
        .split(area);

    draw_slider(
        frame,
        chunks[0],
        "Volume",
        settings.volume,
        settings.selected_row == 0,
    );
    draw_slider(
        frame,
        chunks[1],
        "Feedback frequency",
        settings.frequency,
        settings.selected_row == 1,
    );

    let sound_type = if settings.sound_type.is_empty() {
        "not chosen"
    } else {
        settings.sound_type.as_str()
    };
    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Sound type: ", Style::default().fg(Color::DarkGray)),
            Span::styled(sound_type, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Sound tracks: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} selected", settings.track_count),
                Style::default().fg(Color::White),
            ),
        ]),
    ]);
    frame.render_widget(summary, chunks[3]);
}

fn draw_slider(frame: &mut Frame, area: Rect, label: &str, value: u8, is_active: bool) {
    let border_color = if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" {label} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .gauge_style(Style::default().fg(border_color).bg(Color::Black))
        .percent(u16::from(value.min(100)))
        .label(format!("{value}%"));
    frame.render_widget(gauge, area);
}

fn draw_objects_tab(frame: &mut Frame, area: Rect, settings: &SettingsState) {
    let lines: Vec<Line> = settings
        .object_sounds
        .iter()
        .enumerate()
        .map(|(i, object)| {
            let is_selected = i == settings.selected_row;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!("{prefix}{:<16}", object.category), style),
                Span::styled(
                    format!("◂ {} ▸", object.track_label()),
                    Style::default().fg(Color::White),
                ),
            ])
        })
        .collect();

    let list = Paragraph::new(lines).block(
        Block::default()
            .title(" Sound per object ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}
