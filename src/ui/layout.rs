//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::{FieldKind, FieldName};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Maximum width of the form column
const FORM_WIDTH: u16 = 60;

/// Create the main layout: a centered form column above a status bar
pub fn create_layout(area: Rect) -> Rect {
    // Reserve bottom line for status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = chunks[0];
    let width = content.width.min(FORM_WIDTH);
    Rect {
        x: content.x + (content.width - width) / 2,
        width,
        ..content
    }
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

    // Submission indicator
    let indicator = if app.state.is_submitting() {
        Span::styled(" ◌ ", Style::default().fg(Color::Yellow))
    } else if app.state.enabled {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(indicator);

    // Field-specific hints
    let hints = get_field_hints(app.state.focus.field());
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if !app.state.errors.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "Fix the highlighted fields",
            Style::default().fg(Color::Red),
        ));
    }

    if app.state.is_submitting() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "Submitting…",
            Style::default().fg(Color::Yellow),
        ));
    }

    let quit_hint = " Esc:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the focused row
fn get_field_hints(field: Option<FieldName>) -> &'static str {
    match field.map(|f| f.kind()) {
        Some(FieldKind::Text) => "Tab:next  type to edit  ^S:submit",
        Some(FieldKind::Radio) | Some(FieldKind::Select) => "Tab:next  ←/→:choose  ^S:submit",
        Some(FieldKind::Checkbox) => "Tab:next  Space:toggle  ^S:submit",
        None => "Tab:next  Enter:submit",
    }
}
