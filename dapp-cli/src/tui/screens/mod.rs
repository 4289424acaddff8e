use bscdapp::page::PageView;
use ratatui::prelude::*;

use crate::tui::app::App;
use crate::tui::theme::BscTheme;

mod forms;
mod sign;
mod status;

/// Lay out the visible panels of the page.
pub fn render_page(frame: &mut Frame, theme: &BscTheme, app: &App, view: &PageView, area: Rect) {
    if !view.has_action_panels() {
        status::render(frame, theme, view, area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Status, account, network
            Constraint::Length(5), // Sign
            Constraint::Min(10),   // Forms
        ])
        .split(area);

    status::render(frame, theme, view, layout[0]);
    sign::render(frame, theme, view, layout[1]);
    forms::render(frame, theme, app, view, layout[2]);
}
