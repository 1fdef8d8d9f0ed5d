//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldName, FormValues};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: a bordered box plus its error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a field box and its inline error underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldName,
    values: &FormValues,
    error: &str,
    is_active: bool,
    is_validating: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = match field.kind() {
        FieldKind::Text => text_line(values.text(field), is_active),
        FieldKind::Radio => radio_line(field, values.text(field), is_active),
        FieldKind::Select => select_line(field, values.text(field), is_active),
        FieldKind::Checkbox => checkbox_line(values.agreement, is_active),
    };

    let title = if is_validating {
        format!(" {} … ", field.label())
    } else {
        format!(" {} ", field.label())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), chunks[0]);

    if !error.is_empty() {
        let error_line = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error_line, chunks[1]);
    }
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn text_line(value: &str, is_active: bool) -> Line<'static> {
    let cursor = if is_active { "▌" } else { "" };
    if value.is_empty() && !is_active {
        return Line::from(Span::styled(
            "Type Username",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(vec![
        Span::styled(value.to_string(), value_style(is_active)),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn radio_line(field: FieldName, value: &str, is_active: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for option in field.options() {
        let selected = option.value == value;
        let marker = if selected { "(•)" } else { "( )" };
        let style = if selected {
            value_style(is_active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("{marker} {}  ", option.label), style));
    }
    Line::from(spans)
}

fn select_line(field: FieldName, value: &str, is_active: bool) -> Line<'static> {
    let label = field
        .options()
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
        .unwrap_or(value);
    let arrows = Style::default().fg(if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    });
    Line::from(vec![
        Span::styled("◀ ", arrows),
        Span::styled(label.to_string(), value_style(is_active)),
        Span::styled(" ▶", arrows),
    ])
}

fn checkbox_line(checked: bool, is_active: bool) -> Line<'static> {
    let marker = if checked { "[x]" } else { "[ ]" };
    Line::from(Span::styled(
        format!("{marker} Agree to our terms"),
        value_style(is_active),
    ))
}
