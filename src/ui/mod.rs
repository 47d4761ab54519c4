//! UI module for rendering the TUI

mod components;
mod dashboard;
mod forms;
mod layout;
mod provinces;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (crumbs_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_breadcrumbs(frame, crumbs_area, app.state.current_view);

    match app.state.current_view {
        View::Dashboard => dashboard::draw(frame, main_area),
        View::Provinces => provinces::draw(frame, main_area),
        View::ProvinceCreate => {
            forms::draw_province_create(frame, main_area, app.state.create_page.as_ref())
        }
    }

    layout::draw_status_bar(frame, status_area, app);
}
