//! Field rendering utilities for forms

use crate::state::{CountrySelect, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus the message line beneath it
pub const FIELD_HEIGHT: u16 = 4;

/// Text shown on the line beneath an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage<'a> {
    /// Validation error returned by the backend
    Error(&'a str),
    /// Native required-field hint from a blocked submit
    Hint(&'a str),
}

/// Draw a single-line text input with its message line
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    message: Option<FieldMessage>,
) {
    let (input_area, message_area) = split_field_area(area);

    let cursor = if is_active { "▌" } else { "" };
    let value = if field.value.is_empty() && !is_active {
        Span::styled(field.placeholder.as_str(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(field.value.as_str(), value_style(is_active))
    };

    let mut title = format!(" {} ", field.display_label());
    if let Some(max) = field.max_len {
        title = format!(" {} ({}/{max}) ", field.display_label(), field.value.chars().count());
    }

    let content = Paragraph::new(Line::from(vec![
        value,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    frame.render_widget(content.block(input_block(title, is_active)), input_area);
    draw_message(frame, message_area, message);
}

/// Draw the country select with its message line
pub fn draw_select(
    frame: &mut Frame,
    area: Rect,
    select: &CountrySelect,
    is_active: bool,
    message: Option<FieldMessage>,
) {
    let (input_area, message_area) = split_field_area(area);

    let value_style = if select.selected().is_some() {
        value_style(is_active)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(select.display_value(), value_style)];
    if is_active && !select.options.is_empty() {
        let position = select
            .selected_index()
            .map(|i| format!("  ↑↓ {}/{}", i + 1, select.options.len()))
            .unwrap_or_else(|| "  ↑↓".to_string());
        spans.push(Span::styled(position, Style::default().fg(Color::Cyan)));
    }

    let title = format!(" {} ", select.display_label());
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(input_block(title, is_active)),
        input_area,
    );
    draw_message(frame, message_area, message);
}

fn split_field_area(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn input_block<'a>(title: String, is_active: bool) -> Block<'a> {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn draw_message(frame: &mut Frame, area: Rect, message: Option<FieldMessage>) {
    let Some(message) = message else {
        return;
    };
    let span = match message {
        FieldMessage::Error(text) => Span::styled(text, Style::default().fg(Color::Red)),
        FieldMessage::Hint(text) => Span::styled(text, Style::default().fg(Color::Yellow)),
    };
    // Indent to line up with the text inside the border
    frame.render_widget(Paragraph::new(Line::from(vec![Span::raw(" "), span])), area);
}
