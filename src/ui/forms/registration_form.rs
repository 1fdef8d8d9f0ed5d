//! Registration form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FieldName, SubmitOutcome};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the "Create an Account" form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Create an Account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Outcome banner
            Constraint::Length(FIELD_HEIGHT),  // username
            Constraint::Length(FIELD_HEIGHT),  // favLanguage
            Constraint::Length(FIELD_HEIGHT),  // favFood
            Constraint::Length(FIELD_HEIGHT),  // agreement
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),                // Remaining space
        ])
        .margin(1)
        .split(inner);

    draw_outcome(frame, chunks[0], &app.state.outcome);

    let values = app.state.values();
    let active = app.state.focus.field();
    for field in FieldName::ALL {
        draw_field(
            frame,
            chunks[field.index() + 1],
            field,
            values,
            app.state.errors.get(field),
            active == Some(field),
            app.state.is_validating(field),
        );
    }

    let submit_label = if app.state.is_submitting() {
        "Submitting…"
    } else {
        "Submit"
    };
    let button_area = Rect {
        width: chunks[5].width.min(16),
        ..chunks[5]
    };
    render_button(
        frame,
        button_area,
        submit_label,
        app.state.focus.is_submit_active(),
        app.state.enabled,
    );
}

/// Success in green, failure in red, nothing when there is no outcome
fn draw_outcome(frame: &mut Frame, area: Rect, outcome: &SubmitOutcome) {
    let (text, color) = if let Some(msg) = outcome.success() {
        (msg, Color::Green)
    } else if let Some(msg) = outcome.failure() {
        (msg, Color::Red)
    } else {
        return;
    };
    let banner = Paragraph::new(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(banner, area);
}
