//! Layout components (breadcrumbs, status bar)

use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into breadcrumb bar, main content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Breadcrumbs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the breadcrumb trail for the current view
pub fn draw_breadcrumbs(frame: &mut Frame, area: Rect, view: View) {
    let crumbs = view.breadcrumbs();
    let mut spans = vec![Span::raw(" ")];
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
        }
        let style = if i + 1 == crumbs.len() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(*crumb, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Connection status
    let conn_status = match app.state.backend_reachable {
        Some(true) => Span::styled(" ● ", Style::default().fg(Color::Green)),
        Some(false) => Span::styled(" ○ ", Style::default().fg(Color::Red)),
        None => Span::styled(" ○ ", Style::default().fg(Color::Gray)),
    };
    spans.push(conn_status);

    // View-specific hints
    let hints = get_view_hints(app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(flash) = &app.state.flash {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(flash, Style::default().fg(Color::Green)));
    }

    if !app.state.current_path.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            &app.state.current_path,
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Dashboard => "p:provinces  q:quit".to_string(),
        View::Provinces => "n:new province  Esc:dashboard".to_string(),
        View::ProvinceCreate => format!("Tab:next  {SAVE_SHORTCUT}:save  Esc:cancel"),
    }
}
