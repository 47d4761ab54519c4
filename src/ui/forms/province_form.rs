//! Province create form rendering

use super::field_renderer::{draw_field, draw_select, FieldMessage, FIELD_HEIGHT};
use crate::state::{FieldName, Focus, FormButton, ProvinceCreatePage, REQUIRED_HINT};
use crate::ui::components::{render_action_button, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the province create page, or a loading notice before it is mounted
pub fn draw_province_create(frame: &mut Frame, area: Rect, page: Option<&ProvinceCreatePage>) {
    let Some(page) = page else {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT),        // Header with back button
            Constraint::Length(FIELD_HEIGHT * 3 + 2), // Fields
            Constraint::Length(BUTTON_HEIGHT),        // Actions
            Constraint::Length(1),                    // Help text
            Constraint::Min(0),
        ])
        .split(area);

    draw_header(frame, chunks[0], page);
    draw_fields(frame, chunks[1], page);
    draw_actions(frame, chunks[2], page);
    draw_help(frame, chunks[3]);
}

fn draw_header(frame: &mut Frame, area: Rect, page: &ProvinceCreatePage) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(area);

    render_button(
        frame,
        chunks[0],
        "← Back",
        page.form.focus() == Focus::Back,
        true,
    );

    let title = Paragraph::new(Line::from(Span::styled(
        "Create Province",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::NONE))
    .style(Style::default().fg(Color::White));
    // Vertically center against the button
    let title_area = Rect {
        y: chunks[1].y + 1,
        height: 1,
        x: chunks[1].x + 1,
        width: chunks[1].width.saturating_sub(1),
    };
    frame.render_widget(title, title_area);
}

fn draw_fields(frame: &mut Frame, area: Rect, page: &ProvinceCreatePage) {
    let form = &page.form;
    let focused_field = match form.focus() {
        Focus::Field(field) => Some(field),
        _ => None,
    };

    let border_color = if focused_field.is_some() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Province ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
        ])
        .split(inner);

    let message = |field: FieldName| -> Option<FieldMessage> {
        if let Some(error) = page.submitter.errors().get(field) {
            Some(FieldMessage::Error(error))
        } else if form.required_hint == Some(field) {
            Some(FieldMessage::Hint(REQUIRED_HINT))
        } else {
            None
        }
    };

    draw_select(
        frame,
        rows[0],
        &form.country,
        focused_field == Some(FieldName::CountryId),
        message(FieldName::CountryId),
    );
    draw_field(
        frame,
        rows[1],
        &form.code,
        focused_field == Some(FieldName::Code),
        message(FieldName::Code),
    );
    draw_field(
        frame,
        rows[2],
        &form.name,
        focused_field == Some(FieldName::Name),
        message(FieldName::Name),
    );
}

fn draw_actions(frame: &mut Frame, area: Rect, page: &ProvinceCreatePage) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12), // Cancel
            Constraint::Length(15), // Save
        ])
        .split(area);

    let on_actions = page.form.focus() == Focus::Actions;
    let selected = page.form.selected_button;

    render_action_button(
        frame,
        chunks[1],
        "Cancel",
        on_actions && selected == FormButton::Cancel,
        true,
        Some(Color::Gray),
    );
    render_action_button(
        frame,
        chunks[2],
        page.save_label(),
        on_actions && selected == FormButton::Save,
        page.save_enabled(),
        Some(Color::Green),
    );
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(": choose country  "),
        Span::styled(
            crate::platform::SAVE_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": save  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": cancel"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Country, FieldErrors};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(page: Option<&ProvinceCreatePage>) -> Buffer {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_province_create(frame, frame.area(), page))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    fn row_of(lines: &[String], needle: &str) -> usize {
        lines
            .iter()
            .position(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("{needle:?} not rendered"))
    }

    /// Concatenated symbols of every red cell, row by row
    fn red_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                let cell = &buffer[(x, y)];
                if cell.fg == Color::Red {
                    text.push_str(cell.symbol());
                }
            }
        }
        text
    }

    fn page_with_errors(pairs: &[(&str, &str)]) -> ProvinceCreatePage {
        let mut page = ProvinceCreatePage::new(vec![Country::new("1", "California", "CA")]);
        let errors: FieldErrors = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        page.submitter = crate::state::FormSubmitter::with_errors(errors);
        page
    }

    #[test]
    fn test_renders_all_fields() {
        let page = ProvinceCreatePage::new(vec![Country::new("1", "California", "CA")]);
        let lines = lines(&render(Some(&page)));
        row_of(&lines, "Country *");
        row_of(&lines, "Code *");
        row_of(&lines, "Name *");
        row_of(&lines, "Select a country");
        row_of(&lines, "Create Province");
        row_of(&lines, "Back");
        row_of(&lines, "Cancel");
        row_of(&lines, " Save ");
    }

    #[test]
    fn test_code_error_rendered_beneath_code_input() {
        let page = page_with_errors(&[("code", "already taken")]);
        let buffer = render(Some(&page));
        let lines = lines(&buffer);

        let code_top = row_of(&lines, "Code *");
        // Input border, value, border, then the message line
        assert!(lines[code_top + 3].contains("already taken"));
        assert_eq!(red_text(&buffer), "already taken");
    }

    #[test]
    fn test_each_field_error_sits_under_its_field() {
        let page = page_with_errors(&[
            ("country_id", "pick one"),
            ("code", "too long"),
            ("name", "required"),
        ]);
        let lines = lines(&render(Some(&page)));

        assert!(lines[row_of(&lines, "Country *") + 3].contains("pick one"));
        assert!(lines[row_of(&lines, "Code *") + 3].contains("too long"));
        assert!(lines[row_of(&lines, "Name *") + 3].contains("required"));
    }

    #[test]
    fn test_no_errors_no_red_text() {
        let page = ProvinceCreatePage::new(vec![]);
        assert_eq!(red_text(&render(Some(&page))), "");
    }

    #[test]
    fn test_required_hint_shown_under_field() {
        let mut page = ProvinceCreatePage::new(vec![]);
        page.form.required_hint = Some(FieldName::Name);
        let lines = lines(&render(Some(&page)));
        assert!(lines[row_of(&lines, "Name *") + 3].contains(REQUIRED_HINT));
    }

    #[test]
    fn test_empty_country_list_message() {
        let page = ProvinceCreatePage::new(vec![]);
        let lines = lines(&render(Some(&page)));
        row_of(&lines, "No countries available");
    }

    #[test]
    fn test_selected_country_and_values_rendered() {
        let mut page = ProvinceCreatePage::new(vec![Country::new("1", "California", "CA")]);
        page.form.set_field(FieldName::CountryId, "1".to_string());
        page.form.set_field(FieldName::Code, "CA".to_string());
        let lines = lines(&render(Some(&page)));
        row_of(&lines, "California (CA)");
        row_of(&lines, "Code * (2/10)");
    }

    #[test]
    fn test_loading_before_mount() {
        let lines = lines(&render(None));
        row_of(&lines, "Loading...");
    }
}
