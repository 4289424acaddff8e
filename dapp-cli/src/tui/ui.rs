use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::App;
use crate::tui::input::InputMode;
use crate::tui::screens;
use crate::tui::theme::BscTheme;

/// Render the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let theme = BscTheme::default();
    let view = app.page.view();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Page
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    frame.render_widget(Block::default().style(theme.surface_style()), frame.area());

    render_header(frame, &theme, app, main_layout[0]);
    screens::render_page(frame, &theme, app, &view, main_layout[1]);
    render_footer(frame, &theme, app, view.has_action_panels(), main_layout[2]);

    if app.spinner.spinning {
        app.spinner.render(frame, &theme, centered_rect(40, 3, frame.area()));
    }

    if let Some(popup) = &app.popup {
        popup.render(frame, &theme, centered_rect(60, 9, frame.area()));
    }
}

fn render_header(frame: &mut Frame, theme: &BscTheme, app: &App, area: Rect) {
    let status = match &app.status_message {
        Some((msg, is_error)) => {
            Span::styled(format!(" │ {}", msg), theme.status_style(*is_error))
        }
        None => Span::raw(""),
    };

    let title_line = Line::from(vec![
        Span::styled("BSC Dapp Connector", theme.primary_style().bold()),
        status,
    ]);

    let header = Paragraph::new(title_line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(header, area);
}

const FORMS_HELP: &str = "s: Sign | t: Transfer | x: Execute | b: Balance | Tab: Form | \
    j/k: Field | i: Edit | c: Copy | n/a: Network/Account | q: Quit";

fn render_footer(frame: &mut Frame, theme: &BscTheme, app: &App, forms_visible: bool, area: Rect) {
    let help_text = match (app.input_mode, forms_visible) {
        (InputMode::Insert, _) => "Type to edit | Tab: Next field | Esc/Enter: Done",
        (InputMode::Normal, true) => FORMS_HELP,
        (InputMode::Normal, false) => "e: Enable | b: Balance | n/a: Network/Account | q: Quit",
    };

    let footer_line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.input_mode.label()),
            theme.mode_style(app.input_mode).bold(),
        ),
        Span::styled(" │ ", theme.text_dim_style()),
        Span::styled(help_text, theme.text_dim_style()),
    ]);

    let footer = Paragraph::new(footer_line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(footer, area);
}

/// Centered rect: `percent_x` of the width, `height` rows tall.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
