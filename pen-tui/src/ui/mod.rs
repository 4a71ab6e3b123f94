//! UI rendering
//!
//! Rendering reads the state and draws; it never changes the state. The
//! composer's editors are the one stateful widget and are passed in.

pub mod composer;
pub mod feed;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use self::composer::ComposerWidgets;

/// Render the application UI
pub fn render(frame: &mut Frame, state: &AppState, widgets: &mut ComposerWidgets) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Feed and composer
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], state);

    if state.composer.is_visible() {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        feed::render(frame, body[0], state);
        widgets.render(frame, body[1], state);
    } else {
        feed::render(frame, chunks[1], state);
    }

    render_status_bar(frame, chunks[2], state);

    if state.help_visible {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let style = if state.config.colors_enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let header = Paragraph::new(Line::from(Span::styled(" Penfeed", style)));
    frame.render_widget(header, area);
}

/// Loading indicator text, or `None` when hidden
pub fn loading_label(state: &AppState) -> Option<&'static str> {
    if !state.loading {
        return None;
    }
    Some(if state.config.unicode_enabled {
        "⏳ Loading..."
    } else {
        "Loading..."
    })
}

/// Key hints for the current mode
pub fn hints(state: &AppState) -> &'static str {
    if state.composer.is_visible() {
        if state.can_submit() {
            "Tab: Next field | Ctrl+S: Publish | Esc: Cancel | F1: Help"
        } else {
            "Tab: Next field | Esc: Cancel | F1: Help"
        }
    } else if state.can_reload() {
        "n: New post | r: Reload | j/k: Scroll | F1: Help | q: Quit"
    } else {
        "n: New post | j/k: Scroll | F1: Help | q: Quit"
    }
}

/// Render status bar with loading indicator and hints
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut first = Vec::new();
    if let Some(label) = loading_label(state) {
        let style = if state.config.colors_enabled {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        first.push(Span::styled(label, style));
    }
    if let Some(ref message) = state.status.message {
        if !first.is_empty() {
            first.push(Span::raw(" | "));
        }
        first.push(Span::raw(message.as_str()));
    }

    let hint_style = if state.config.colors_enabled {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    };

    let status = Paragraph::new(vec![
        Line::from(first),
        Line::from(Span::styled(hints(state), hint_style)),
    ])
    .block(Block::default().borders(Borders::TOP));

    frame.render_widget(status, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Feed:"),
        Line::from("  n        - New post"),
        Line::from("  r        - Reload posts"),
        Line::from("  j / Down - Scroll down"),
        Line::from("  k / Up   - Scroll up"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from("Composer:"),
        Line::from("  Tab      - Next field"),
        Line::from("  S-Tab    - Previous field"),
        Line::from("  Ctrl+S   - Publish"),
        Line::from("  Esc      - Cancel and discard"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Helper to create centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
