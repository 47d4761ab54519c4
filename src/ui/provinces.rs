//! Provinces list view

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Press "),
            Span::styled("n", Style::default().fg(Color::Cyan)),
            Span::raw(" to add a province."),
        ]),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" Provinces ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}
